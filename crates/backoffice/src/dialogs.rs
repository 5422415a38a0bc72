/// Modal dialog service used to talk to the operator.
pub trait Dialogs: Send + Sync {
    /// Blocking message box.
    fn alert(&self, message: &str);
    /// Yes/no question; `true` means the operator confirmed.
    fn confirm(&self, message: &str) -> bool;
}
