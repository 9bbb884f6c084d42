use std::rc::Rc;

use memorybook_core::tiles::swap_option_label;
use memorybook_core::BoardEvent;
use web_sys::{DragEvent, Element};
use yew::prelude::*;

use crate::dom;
use crate::page_core::{PageAction, PageCore};

const DRAG_FORMAT: &str = "text/plain";

type EventFilter = fn(&BoardEvent) -> bool;

#[derive(Properties, Clone)]
pub(crate) struct BoardProps {
    pub(crate) core: Rc<PageCore>,
}

impl PartialEq for BoardProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

/// Re-renders the calling component whenever `wants` accepts a board event.
#[hook]
fn use_board_updates(core: &Rc<PageCore>, wants: EventFilter) {
    let trigger = use_force_update();
    let core = core.clone();
    use_effect_with((), move |_| {
        let subscription = core.subscribe(Rc::new(move |event: &BoardEvent| {
            if wants(event) {
                trigger.force_update();
            }
        }));
        move || drop(subscription)
    });
}

fn is_arrangement_event(event: &BoardEvent) -> bool {
    matches!(event, BoardEvent::ArrangementChanged)
}

fn is_collage_event(event: &BoardEvent) -> bool {
    matches!(event, BoardEvent::Revealed(reveal) if !reveal.collage.is_empty())
}

fn is_modal_event(event: &BoardEvent) -> bool {
    matches!(event, BoardEvent::ModalChanged)
}

fn current_words(core: &PageCore) -> Vec<String> {
    core.with_board(|board| {
        board
            .arrangement()
            .map(|arrangement| arrangement.words().iter().map(|word| word.to_string()).collect())
            .unwrap_or_default()
    })
}

#[function_component(TileGrid)]
pub(crate) fn tile_grid(props: &BoardProps) -> Html {
    use_board_updates(&props.core, is_arrangement_event);
    let words = current_words(&props.core);
    let tiles = words.into_iter().enumerate().map(|(index, word)| {
        let ondragstart = Callback::from(move |event: DragEvent| {
            if let Some(transfer) = event.data_transfer() {
                let _ = transfer.set_data(DRAG_FORMAT, &index.to_string());
                transfer.set_effect_allowed("move");
            }
        });
        let ondragover = Callback::from(|event: DragEvent| {
            event.prevent_default();
            if let Some(transfer) = event.data_transfer() {
                transfer.set_drop_effect("move");
            }
        });
        let core = props.core.clone();
        let ondrop = Callback::from(move |event: DragEvent| {
            event.prevent_default();
            let from = event
                .data_transfer()
                .and_then(|transfer| transfer.get_data(DRAG_FORMAT).ok())
                .unwrap_or_default();
            core.dispatch(PageAction::SwapUi {
                from,
                to: index.to_string(),
            });
        });
        html! {
            <button
                type="button"
                class="tile"
                role="listitem"
                draggable="true"
                data-index={index.to_string()}
                {ondragstart}
                {ondragover}
                {ondrop}
            >
                { word }
            </button>
        }
    });
    html! { <>{ for tiles }</> }
}

#[function_component(SwapOptions)]
pub(crate) fn swap_options(props: &BoardProps) -> Html {
    use_board_updates(&props.core, is_arrangement_event);
    let words = current_words(&props.core);
    let options = words.iter().enumerate().map(|(index, word)| {
        html! {
            <option value={index.to_string()}>{ swap_option_label(index, word) }</option>
        }
    });
    html! { <>{ for options }</> }
}

#[function_component(CollageGrid)]
pub(crate) fn collage_grid(props: &BoardProps) -> Html {
    use_board_updates(&props.core, is_collage_event);
    let tiles = props.core.with_board(|board| board.collage_tiles().to_vec());
    let cells = tiles.into_iter().map(|tile| {
        html! {
            <div class="collage-item" style={format!("--tilt: {}", tile.tilt)}>
                <img src={tile.image_path} alt={tile.title} />
            </div>
        }
    });
    html! { <>{ for cells }</> }
}

#[function_component(ModalBody)]
pub(crate) fn modal_body(props: &BoardProps) -> Html {
    use_board_updates(&props.core, is_modal_event);
    let item = props.core.with_board(|board| {
        board
            .modal_view()
            .and_then(|view| view.item.cloned())
    });
    let Some(item) = item else {
        return html! {};
    };
    html! {
        <>
            <p>{ item.memory_text }</p>
            <img src={item.image_path} alt={item.title} />
        </>
    }
}

fn mount<C>(id: &str, core: &Rc<PageCore>)
where
    C: BaseComponent<Properties = BoardProps>,
{
    let Some(root) = dom::by_id::<Element>(id) else {
        return;
    };
    let _handle = yew::Renderer::<C>::with_root_and_props(root, BoardProps { core: core.clone() })
        .render();
}

/// Mounts the board-driven components into their page containers.
pub(crate) fn mount_all(core: &Rc<PageCore>) {
    mount::<TileGrid>("tileGrid", core);
    mount::<SwapOptions>("swapFrom", core);
    mount::<SwapOptions>("swapTo", core);
    mount::<CollageGrid>("collageGrid", core);
    mount::<ModalBody>("modalBody", core);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug_log::DebugLog;
    use gloo::timers::future::TimeoutFuture;
    use memorybook_core::BoardConfig;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_root() -> Element {
        let document = dom::document().expect("document available");
        let root = document.create_element("div").expect("create test root");
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        root
    }

    #[wasm_bindgen_test(async)]
    async fn tile_grid_follows_swaps() {
        console_error_panic_hook::set_once();
        let core = PageCore::new(BoardConfig::default(), DebugLog::new("grace", false));
        let root = test_root();
        let _handle =
            yew::Renderer::<TileGrid>::with_root_and_props(root.clone(), BoardProps { core: core.clone() })
                .render();
        TimeoutFuture::new(0).await;
        assert_eq!(root.children().length(), 0);

        core.dispatch(PageAction::UnlockBypass);
        TimeoutFuture::new(10).await;
        assert_eq!(root.text_content().as_deref(), Some("crazygirlgraciebear"));

        core.dispatch(PageAction::SwapUi {
            from: "0".into(),
            to: "3".into(),
        });
        TimeoutFuture::new(10).await;
        assert_eq!(root.text_content().as_deref(), Some("beargirlgraciecrazy"));
    }

    #[wasm_bindgen_test(async)]
    async fn swap_options_are_labelled() {
        let core = PageCore::new(BoardConfig::default(), DebugLog::new("grace", false));
        core.dispatch(PageAction::UnlockBypass);
        let root = test_root();
        let _handle =
            yew::Renderer::<SwapOptions>::with_root_and_props(root.clone(), BoardProps { core })
                .render();
        TimeoutFuture::new(10).await;
        let first = root.first_element_child().expect("first option");
        assert_eq!(first.text_content().as_deref(), Some("1: crazy"));
        assert_eq!(first.get_attribute("value").as_deref(), Some("0"));
        assert_eq!(root.children().length(), 4);
    }
}
