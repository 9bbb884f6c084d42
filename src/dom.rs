use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

pub(crate) fn document() -> Option<Document> {
    web_sys::window().and_then(|window| window.document())
}

pub(crate) fn body() -> Option<HtmlElement> {
    document().and_then(|document| document.body())
}

pub(crate) fn by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub(crate) fn query_all(selector: &str) -> Vec<Element> {
    let Some(list) = document().and_then(|document| document.query_selector_all(selector).ok())
    else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn set_text(element: Option<&Element>, text: &str) {
    if let Some(element) = element {
        element.set_text_content(Some(text));
    }
}

pub(crate) fn set_hidden(element: Option<&HtmlElement>, hidden: bool) {
    if let Some(element) = element {
        element.set_hidden(hidden);
    }
}

pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

pub(crate) fn set_body_class(class: &str, on: bool) {
    if let Some(body) = body() {
        set_class(&body, class, on);
    }
}

#[cfg(test)]
pub(crate) fn has_body_class(class: &str) -> bool {
    body()
        .map(|body| body.class_list().contains(class))
        .unwrap_or(false)
}

/// Value of `attr` on the nearest ancestor (or self) matching `selector`.
pub(crate) fn closest_attr(element: &Element, selector: &str, attr: &str) -> Option<String> {
    element.closest(selector).ok()??.get_attribute(attr)
}
