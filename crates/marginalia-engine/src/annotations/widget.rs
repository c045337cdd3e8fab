use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::annotations::scanner::Marker;

/// Capability handed to widgets so activating one can open the annotation it
/// points at. The engine only passes the index along; loading and saving the
/// annotation body is the implementor's business.
pub trait AnnotationOpener {
    fn open(&self, index: u32);
}

impl<F: Fn(u32)> AnnotationOpener for F {
    fn open(&self, index: u32) {
        self(index)
    }
}

/// The inline widget a marker's payload is replaced with in live mode.
#[derive(Clone)]
pub struct AnnotationWidget {
    index: Option<u32>,
    anchor_text: String,
    payload_text: String,
    opener: Option<Rc<dyn AnnotationOpener>>,
}

impl AnnotationWidget {
    pub fn new(marker: &Marker, opener: Option<Rc<dyn AnnotationOpener>>) -> Self {
        Self {
            index: marker.index,
            anchor_text: marker.anchor_text.clone(),
            payload_text: marker.payload_text.clone(),
            opener,
        }
    }

    pub fn index(&self) -> Option<u32> {
        self.index
    }

    pub fn anchor_text(&self) -> &str {
        &self.anchor_text
    }

    pub fn payload_text(&self) -> &str {
        &self.payload_text
    }

    /// `{N}` for an indexed marker, `{}` otherwise.
    pub fn label(&self) -> String {
        match self.index {
            Some(index) => format!("{{{index}}}"),
            None => "{}".to_string(),
        }
    }

    /// Whether [`activate`](Self::activate) would do anything.
    pub fn is_active(&self) -> bool {
        self.index.is_some() && self.opener.is_some()
    }

    /// Hands the index to the opener. Returns `false`, doing nothing, when
    /// there's no index or no opener.
    pub fn activate(&self) -> bool {
        match (self.index, &self.opener) {
            (Some(index), Some(opener)) => {
                debug!("opening annotation {index} for {:?}", self.anchor_text);
                opener.open(index);
                true
            }
            _ => false,
        }
    }
}

impl PartialEq for AnnotationWidget {
    fn eq(&self, other: &Self) -> bool {
        let same_opener = match (&self.opener, &other.opener) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_opener
            && self.index == other.index
            && self.anchor_text == other.anchor_text
            && self.payload_text == other.payload_text
    }
}

impl fmt::Debug for AnnotationWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationWidget")
            .field("index", &self.index)
            .field("anchor_text", &self.anchor_text)
            .field("payload_text", &self.payload_text)
            .field("opener", &self.opener.is_some())
            .finish()
    }
}

impl fmt::Display for AnnotationWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
