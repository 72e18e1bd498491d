//! End-to-end behaviour of a served namespace, driven over the wire.

#![expect(clippy::expect_used, reason = "tests use expect for clarity")]

use std::sync::Arc;

use portico_channel::{ChannelError, Endpoint, Frame, Signal};
use portico_wire::{
    NodeAttributes, NodeEvent, NodeInfo, OpenFlags, RequestBody, ResponseFrame, Status,
};
use rstest::{fixture, rstest};

use crate::local_registry::{LocalRegistry, RegistryOptions};
use crate::tests::support::ProviderLog;
use crate::{Namespace, NamespaceBuilder};

/// A namespace served over a live connection, seen from the client side.
struct ServedNamespace {
    client: Endpoint,
    log: Arc<ProviderLog>,
}

/// Marker the provider writes on every endpoint it receives.
const PROVIDER_MARKER: &[u8] = b"provider-connected";

fn serve_with(builder: NamespaceBuilder, log: Arc<ProviderLog>) -> ServedNamespace {
    let namespace = builder.build().expect("build namespace");
    let (endpoint, client) = Endpoint::pair();
    namespace.serve(endpoint).expect("serve namespace");
    assert_eq!(client.recv_signal().expect("ready signal"), Signal::READY);
    ServedNamespace { client, log }
}

#[fixture]
fn served() -> ServedNamespace {
    let log = ProviderLog::new();
    let builder = Namespace::builder()
        .provider(log.marking_recorder(PROVIDER_MARKER))
        .registry(Arc::new(LocalRegistry::new(RegistryOptions::default())));
    serve_with(builder, log)
}

fn send_request(client: &Endpoint, body: &RequestBody) {
    client
        .send(Frame::from_bytes(body.encode().expect("encode request")))
        .expect("send request");
}

fn send_request_with(client: &Endpoint, body: &RequestBody, attached: Endpoint) {
    client
        .send(Frame::from_bytes(body.encode().expect("encode request")).with_channel(attached))
        .expect("send request");
}

fn recv_response(client: &Endpoint) -> ResponseFrame {
    let frame = client.recv().expect("receive response");
    ResponseFrame::decode(&frame.bytes).expect("decode response")
}

#[rstest]
fn open_routes_the_attached_endpoint_to_the_provider(served: ServedNamespace) {
    let ServedNamespace { client, log } = served;
    let (object, object_peer) = Endpoint::pair();
    send_request_with(
        &client,
        &RequestBody::Open {
            flags: OpenFlags::NONE,
            path: "logger".into(),
        },
        object,
    );

    // The marker arriving proves the provider received the endpoint.
    let frame = object_peer.recv().expect("provider marker");
    assert_eq!(frame.bytes, PROVIDER_MARKER);
    assert_eq!(log.paths(), vec!["logger".to_owned()]);
}

#[rstest]
fn describe_flag_acknowledges_before_the_provider_speaks(served: ServedNamespace) {
    let ServedNamespace { client, .. } = served;
    let (object, object_peer) = Endpoint::pair();
    send_request_with(
        &client,
        &RequestBody::Open {
            flags: OpenFlags::DESCRIBE,
            path: "logger".into(),
        },
        object,
    );

    let first = object_peer.recv().expect("acknowledgment");
    assert_eq!(
        NodeEvent::decode(&first.bytes).expect("decode acknowledgment"),
        NodeEvent::on_open(Status::Ok, Some(NodeInfo::service()))
    );
    let second = object_peer.recv().expect("provider marker");
    assert_eq!(second.bytes, PROVIDER_MARKER);
}

#[rstest]
fn multi_segment_open_rejects_and_closes_the_endpoint(served: ServedNamespace) {
    let ServedNamespace { client, log } = served;
    let (object, object_peer) = Endpoint::pair();
    send_request_with(
        &client,
        &RequestBody::Open {
            flags: OpenFlags::DESCRIBE,
            path: "svc/logger".into(),
        },
        object,
    );

    let ack = object_peer.recv().expect("acknowledgment");
    assert_eq!(
        NodeEvent::decode(&ack.bytes).expect("decode acknowledgment"),
        NodeEvent::on_open(Status::NotSupported, None)
    );
    assert!(matches!(object_peer.recv(), Err(ChannelError::Disconnected)));
    assert_eq!(log.call_count(), 0);
}

#[rstest]
fn self_open_keeps_the_endpoint_alive(served: ServedNamespace) {
    let ServedNamespace { client, .. } = served;
    let (object, object_peer) = Endpoint::pair();
    send_request_with(
        &client,
        &RequestBody::Open {
            flags: OpenFlags::DESCRIBE,
            path: ".".into(),
        },
        object,
    );

    let ack = object_peer.recv().expect("acknowledgment");
    assert_eq!(
        NodeEvent::decode(&ack.bytes).expect("decode acknowledgment"),
        NodeEvent::on_open(Status::Ok, Some(NodeInfo::directory()))
    );
    assert!(object_peer.try_recv().expect("connection open").is_none());
}

#[rstest]
fn describe_returns_the_directory_descriptor(served: ServedNamespace) {
    let ServedNamespace { client, .. } = served;
    send_request(&client, &RequestBody::Describe);
    assert_eq!(
        recv_response(&client),
        ResponseFrame::Node {
            info: NodeInfo::directory(),
        }
    );
}

#[rstest]
#[case::sync(RequestBody::Sync, ResponseFrame::not_supported())]
#[case::get_attr(
    RequestBody::GetAttr,
    ResponseFrame::Attributes {
        status: Status::NotSupported,
        attributes: NodeAttributes::EMPTY,
    }
)]
#[case::set_attr(
    RequestBody::SetAttr { flags: 0, attributes: NodeAttributes::EMPTY },
    ResponseFrame::not_supported()
)]
#[case::ioctl(
    RequestBody::Ioctl { opcode: 7, max_out: 64, input: vec![1, 2, 3] },
    ResponseFrame::Data { status: Status::NotSupported, data: Vec::new() }
)]
#[case::unlink(
    RequestBody::Unlink { path: "logger".into() },
    ResponseFrame::not_supported()
)]
#[case::read_dirents(
    RequestBody::ReadDirents { max_bytes: 4096 },
    ResponseFrame::Data { status: Status::NotSupported, data: Vec::new() }
)]
#[case::rewind(RequestBody::Rewind, ResponseFrame::not_supported())]
#[case::get_token(
    RequestBody::GetToken,
    ResponseFrame::Token { status: Status::NotSupported, token: None }
)]
#[case::rename(
    RequestBody::Rename { src: "a".into(), dst: "b".into() },
    ResponseFrame::not_supported()
)]
#[case::link(
    RequestBody::Link { src: "a".into(), dst: "b".into() },
    ResponseFrame::not_supported()
)]
#[case::list_interfaces(
    RequestBody::ListInterfaces,
    ResponseFrame::Interfaces { status: Status::NotSupported, interfaces: Vec::new() }
)]
#[case::bind(
    RequestBody::Bind { interface: "portico.logger.Log".into() },
    ResponseFrame::not_supported()
)]
#[case::close(RequestBody::Close, ResponseFrame::not_supported())]
fn degenerate_verbs_reply_with_constants(
    served: ServedNamespace,
    #[case] request: RequestBody,
    #[case] expected: ResponseFrame,
) {
    let ServedNamespace { client, log } = served;
    send_request(&client, &request);
    assert_eq!(recv_response(&client), expected);
    assert_eq!(log.call_count(), 0);
}

#[rstest]
fn degenerate_verbs_leave_the_connection_usable(served: ServedNamespace) {
    let ServedNamespace { client, .. } = served;
    send_request(&client, &RequestBody::Sync);
    assert_eq!(recv_response(&client), ResponseFrame::not_supported());

    // A later open on the same connection still routes normally.
    let (object, object_peer) = Endpoint::pair();
    send_request_with(
        &client,
        &RequestBody::Open {
            flags: OpenFlags::NONE,
            path: "metrics".into(),
        },
        object,
    );
    assert_eq!(object_peer.recv().expect("marker").bytes, PROVIDER_MARKER);
}

#[rstest]
fn watch_closes_the_watcher_and_reports_not_supported(served: ServedNamespace) {
    let ServedNamespace { client, .. } = served;
    let (watcher, watcher_peer) = Endpoint::pair();
    send_request_with(
        &client,
        &RequestBody::Watch {
            mask: 0x1f,
            options: 0,
        },
        watcher,
    );

    assert_eq!(recv_response(&client), ResponseFrame::not_supported());
    assert!(matches!(watcher_peer.recv(), Err(ChannelError::Disconnected)));
}

#[rstest]
fn cloned_connection_serves_the_same_namespace(served: ServedNamespace) {
    let ServedNamespace { client, log } = served;
    let (clone_endpoint, clone_client) = Endpoint::pair();
    send_request_with(
        &client,
        &RequestBody::Clone {
            flags: OpenFlags::DESCRIBE,
        },
        clone_endpoint,
    );

    assert_eq!(
        clone_client.recv_signal().expect("ready on clone"),
        Signal::READY
    );
    let ack = clone_client.recv().expect("clone acknowledgment");
    assert_eq!(
        NodeEvent::decode(&ack.bytes).expect("decode acknowledgment"),
        NodeEvent::on_open(Status::Ok, Some(NodeInfo::service()))
    );

    // Opens issued through the clone reach the same provider.
    let (object, object_peer) = Endpoint::pair();
    send_request_with(
        &clone_client,
        &RequestBody::Open {
            flags: OpenFlags::NONE,
            path: "tracing".into(),
        },
        object,
    );
    assert_eq!(object_peer.recv().expect("marker").bytes, PROVIDER_MARKER);
    assert!(log.paths().contains(&"tracing".to_owned()));
}

#[rstest]
fn stray_attached_endpoint_drops_the_connection(served: ServedNamespace) {
    let ServedNamespace { client, .. } = served;
    let (stray, _stray_peer) = Endpoint::pair();
    send_request_with(&client, &RequestBody::Describe, stray);

    assert!(matches!(client.recv(), Err(ChannelError::Disconnected)));
}

#[rstest]
fn missing_attached_endpoint_drops_the_connection(served: ServedNamespace) {
    let ServedNamespace { client, log } = served;
    send_request(
        &client,
        &RequestBody::Open {
            flags: OpenFlags::NONE,
            path: "logger".into(),
        },
    );

    assert!(matches!(client.recv(), Err(ChannelError::Disconnected)));
    assert_eq!(log.call_count(), 0);
}

#[rstest]
fn garbage_payload_drops_the_connection(served: ServedNamespace) {
    let ServedNamespace { client, .. } = served;
    client
        .send(Frame::from_bytes(b"{not json}\n".to_vec()))
        .expect("send garbage");

    assert!(matches!(client.recv(), Err(ChannelError::Disconnected)));
}
