use ksync_derive::ksync_error;
use std::borrow::Cow;

#[ksync_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Remote rejected the request{}: {message}", format_context(.context))]
    RemoteRejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("disk")).context("Reading settings")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.kind(), "io");
    assert_eq!(err.to_string(), "IO error (Reading settings): disk");

    let internal: DemoError = "boom".into();
    assert_eq!(internal.kind(), "internal");

    let rejected = DemoError::RemoteRejected { message: "nope".into(), context: None };
    assert_eq!(rejected.kind(), "remote_rejected");
}
