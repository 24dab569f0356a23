/// Blocking browser dialogs used to report failures and confirm deletes.
pub trait Dialogs {
    fn alert(&self, message: &str);

    fn confirm(&self, message: &str) -> bool;
}

/// `window.alert` / `window.confirm`.
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }

    fn confirm(&self, message: &str) -> bool {
        gloo::dialogs::confirm(message)
    }
}
