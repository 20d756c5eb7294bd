/// Host side effects the console triggers but does not implement: clipboard
/// writes and showing content in a new view.
pub trait Effects {
    fn copy_text(&self, text: &str) -> anyhow::Result<()>;
    fn open_in_new_view(&self, content: &str) -> anyhow::Result<()>;
}
