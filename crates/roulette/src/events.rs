use async_channel::Sender;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Open,
    Close,
    Toggle,
    /// Reply with the committed value.
    Query(Sender<String>),
    ConfigReload,
}
