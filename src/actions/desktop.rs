use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("could not open {url}: {message}")]
    Browser { url: String, message: String },

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Side effects the action buttons need from the host desktop.
pub trait Desktop {
    fn open_url(&mut self, url: &str) -> Result<(), ActionError>;
    fn copy_text(&mut self, text: &str) -> Result<(), ActionError>;
}

/// Default browser via `webbrowser`, clipboard via `arboard`.
///
/// The clipboard handle is created on first use and kept, since on X11 the
/// copied text disappears when its owner is dropped.
#[derive(Default)]
pub struct SystemDesktop {
    clipboard: Option<arboard::Clipboard>,
}

impl SystemDesktop {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Desktop for SystemDesktop {
    fn open_url(&mut self, url: &str) -> Result<(), ActionError> {
        webbrowser::open(url).map_err(|e| ActionError::Browser {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    fn copy_text(&mut self, text: &str) -> Result<(), ActionError> {
        if self.clipboard.is_none() {
            let cb = arboard::Clipboard::new().map_err(|e| ActionError::Clipboard(e.to_string()))?;
            self.clipboard = Some(cb);
        }
        match self.clipboard.as_mut() {
            Some(cb) => cb
                .set_text(text.to_string())
                .map_err(|e| ActionError::Clipboard(e.to_string())),
            None => Err(ActionError::Clipboard("not initialised".to_string())),
        }
    }
}
