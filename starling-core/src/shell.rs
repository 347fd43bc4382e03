//! Handing URLs and text to the desktop.

#[derive(Debug)]
pub enum ShellError {
    Open(std::io::Error),
    Clipboard(arboard::Error),
}
impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Open(e) => write!(f, "Failed to open URL: {e}"),
            ShellError::Clipboard(e) => write!(f, "Failed to access clipboard: {e}"),
        }
    }
}
impl std::error::Error for ShellError {}
impl From<arboard::Error> for ShellError {
    fn from(e: arboard::Error) -> Self {
        ShellError::Clipboard(e)
    }
}

/// Open `url` in the user's default handler without waiting for it.
pub fn open_external(url: &str) -> Result<(), ShellError> {
    tracing::debug!("opening {url}");
    open::that_detached(url).map_err(ShellError::Open)
}

pub fn copy_to_clipboard(text: &str) -> Result<(), ShellError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_owned())?;
    Ok(())
}
