use itertools::Itertools;

use crate::web_document::WebDocument;
use crate::web_error_handling::JsResult;


pub trait WebElementExt {
    fn with_text_content(self, text: &str) -> web_sys::Element;
    fn with_attribute(self, name: &str, value: &str) -> JsResult<web_sys::Element>;
    fn with_classes<'a>(self, classes: impl IntoIterator<Item = &'a str>)
    -> JsResult<web_sys::Element>;

    // Replaces the whole class list. Cheaper than diffing for cells that change wholesale.
    fn set_classes<'a>(&self, classes: impl IntoIterator<Item = &'a str>);

    fn is_displayed(&self) -> bool;
    fn set_displayed(&self, displayed: bool) -> JsResult<()>;

    fn remove_all_children(&self);
    fn append_new_element(
        &self, document: &WebDocument, local_name: &str,
    ) -> JsResult<web_sys::Element>;
}

impl WebElementExt for web_sys::Element {
    fn with_text_content(self, text: &str) -> web_sys::Element {
        self.set_text_content(Some(text));
        self
    }

    fn with_attribute(self, name: &str, value: &str) -> JsResult<web_sys::Element> {
        self.set_attribute(name, value)?;
        Ok(self)
    }

    fn with_classes<'a>(
        self, classes: impl IntoIterator<Item = &'a str>,
    ) -> JsResult<web_sys::Element> {
        for class in classes {
            self.class_list().add_1(class)?;
        }
        Ok(self)
    }

    fn set_classes<'a>(&self, classes: impl IntoIterator<Item = &'a str>) {
        self.set_class_name(&classes.into_iter().join(" "));
    }

    fn is_displayed(&self) -> bool { !self.class_list().contains("display-none") }

    fn set_displayed(&self, displayed: bool) -> JsResult<()> {
        self.class_list().toggle_with_force("display-none", !displayed)?;
        Ok(())
    }

    fn remove_all_children(&self) { self.replace_children_with_node_0() }

    fn append_new_element(
        &self, document: &WebDocument, local_name: &str,
    ) -> JsResult<web_sys::Element> {
        let node = document.create_element(local_name)?;
        self.append_child(&node)?;
        Ok(node)
    }
}
