use super::DispatchRequest;

pub enum Action {
    BackendRequest(DispatchRequest),
    CopyToClipboard(String),
}
