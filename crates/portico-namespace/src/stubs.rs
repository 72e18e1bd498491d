//! Constant responses for the unimplemented directory verbs.
//!
//! The protocol surface is much larger than the namespace's real behavior.
//! Callers still depend on receiving *a* response for every verb, so each
//! degenerate operation maps to a fixed `not_supported` reply through one
//! table. Keeping the table separate leaves the live logic (`open`,
//! `clone`, `describe`, serve) visually isolated from the stubs.

use portico_wire::{DirectoryVerb, NodeAttributes, ResponseFrame, Status};

/// Returns the constant reply for a degenerate verb, or `None` for verbs
/// the namespace actually implements.
pub(crate) const fn stub_response(verb: DirectoryVerb) -> Option<ResponseFrame> {
    match verb {
        DirectoryVerb::Open | DirectoryVerb::Clone | DirectoryVerb::Describe => None,
        DirectoryVerb::GetAttr => Some(ResponseFrame::Attributes {
            status: Status::NotSupported,
            attributes: NodeAttributes::EMPTY,
        }),
        DirectoryVerb::Ioctl | DirectoryVerb::ReadDirents => Some(ResponseFrame::Data {
            status: Status::NotSupported,
            data: Vec::new(),
        }),
        DirectoryVerb::GetToken => Some(ResponseFrame::Token {
            status: Status::NotSupported,
            token: None,
        }),
        DirectoryVerb::ListInterfaces => Some(ResponseFrame::Interfaces {
            status: Status::NotSupported,
            interfaces: Vec::new(),
        }),
        DirectoryVerb::Close
        | DirectoryVerb::Bind
        | DirectoryVerb::Sync
        | DirectoryVerb::SetAttr
        | DirectoryVerb::Unlink
        | DirectoryVerb::Rewind
        | DirectoryVerb::Rename
        | DirectoryVerb::Link
        | DirectoryVerb::Watch => Some(ResponseFrame::not_supported()),
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "tests use expect for clarity")]

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(DirectoryVerb::Close)]
    #[case(DirectoryVerb::ListInterfaces)]
    #[case(DirectoryVerb::Bind)]
    #[case(DirectoryVerb::Sync)]
    #[case(DirectoryVerb::GetAttr)]
    #[case(DirectoryVerb::SetAttr)]
    #[case(DirectoryVerb::Ioctl)]
    #[case(DirectoryVerb::Unlink)]
    #[case(DirectoryVerb::ReadDirents)]
    #[case(DirectoryVerb::Rewind)]
    #[case(DirectoryVerb::GetToken)]
    #[case(DirectoryVerb::Rename)]
    #[case(DirectoryVerb::Link)]
    #[case(DirectoryVerb::Watch)]
    fn degenerate_verbs_report_not_supported(#[case] verb: DirectoryVerb) {
        let response = stub_response(verb).expect("degenerate verb has a stub");
        let status = match response {
            ResponseFrame::Status { status }
            | ResponseFrame::Attributes { status, .. }
            | ResponseFrame::Data { status, .. }
            | ResponseFrame::Token { status, .. }
            | ResponseFrame::Interfaces { status, .. } => status,
            ResponseFrame::Node { .. } => panic!("stub must not describe a node"),
        };
        assert_eq!(status, Status::NotSupported);
    }

    #[rstest]
    #[case(DirectoryVerb::Open)]
    #[case(DirectoryVerb::Clone)]
    #[case(DirectoryVerb::Describe)]
    fn implemented_verbs_have_no_stub(#[case] verb: DirectoryVerb) {
        assert!(stub_response(verb).is_none());
    }

    #[test]
    fn get_token_stub_carries_no_token() {
        assert_eq!(
            stub_response(DirectoryVerb::GetToken),
            Some(ResponseFrame::Token {
                status: Status::NotSupported,
                token: None,
            })
        );
    }

    #[test]
    fn get_attr_stub_carries_zeroed_attributes() {
        assert_eq!(
            stub_response(DirectoryVerb::GetAttr),
            Some(ResponseFrame::Attributes {
                status: Status::NotSupported,
                attributes: NodeAttributes::EMPTY,
            })
        );
    }
}
