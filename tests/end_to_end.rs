//! End-to-end scenarios exercising the join handshake and the two routing
//! cores together, plus the universal invariants over ids and router
//! index cleanliness.

use serde_json::{json, Value};

use wamp_core::acceptor::Acceptor;
use wamp_core::auth::{
    verify_cryptosign_signature, AuthRequest, AuthResponse, CryptosignAuthenticator, ServerAuthenticator,
    WampCraAuthenticator,
};
use wamp_core::broker::Broker;
use wamp_core::dealer::Dealer;
use wamp_core::id::{generate_session_id, SessionScopeIdGenerator, MAX_ID};
use wamp_core::joiner::Joiner;
use wamp_core::messages::{Call, Messages, Publish, Register, Subscribe, Yield};
use wamp_core::serializers::{JsonSerializer, Serializer};
use wamp_core::types::SessionDetails;

struct WampCraRouter;
impl ServerAuthenticator for WampCraRouter {
    fn authenticate(&self, request: &AuthRequest) -> Result<AuthResponse, wamp_core::Error> {
        assert_eq!(request.method, "wampcra");
        Ok(AuthResponse::WampCra {
            authid: request.authid.clone(),
            authrole: "user".to_string(),
            secret: "password".to_string(),
            salt: None,
        })
    }
}

struct CryptosignRouter {
    authid: String,
}
impl ServerAuthenticator for CryptosignRouter {
    fn authenticate(&self, request: &AuthRequest) -> Result<AuthResponse, wamp_core::Error> {
        Ok(AuthResponse::Cryptosign {
            authid: request.authid.clone(),
            authrole: "user".to_string(),
        })
    }
}

#[test]
fn scenario_1_anonymous_join() {
    let mut joiner = Joiner::anonymous("realm1");
    let hello = joiner.send_hello(None);
    assert_eq!(hello.realm, "realm1");
    assert_eq!(hello.details["authid"], "anonymous");
    assert_eq!(hello.details["authmethods"], json!(["anonymous"]));
    for role in ["callee", "caller", "publisher", "subscriber"] {
        assert!(hello.details["roles"].get(role).is_some());
    }

    let mut acceptor = Acceptor::open();
    let reply = acceptor.receive_message(Messages::Hello(hello)).unwrap();
    let welcome = match reply {
        Messages::Welcome(w) => w,
        other => panic!("expected Welcome, got {other:?}"),
    };
    assert_eq!(welcome.details["authid"], "anonymous");
    assert_eq!(welcome.details["authrole"], "anonymous");
    assert_eq!(welcome.details["authmethod"], "anonymous");
    assert!(welcome.details["roles"].get("dealer").is_some());
    assert!(welcome.details["roles"].get("broker").is_some());

    joiner.receive_message(Messages::Welcome(welcome)).unwrap();

    let client_details = joiner.get_session_details().unwrap();
    let router_details = acceptor.get_session_details().unwrap();
    assert_eq!(client_details, router_details);
}

#[test]
fn scenario_2_wampcra_join() {
    let mut joiner = Joiner::new("realm1", Box::new(WampCraAuthenticator::new("alice", "password")));
    let hello = joiner.send_hello(None);

    let mut acceptor = Acceptor::new(Some(Box::new(WampCraRouter)), None);
    let challenge_msg = acceptor.receive_message(Messages::Hello(hello)).unwrap();
    let challenge = match challenge_msg {
        Messages::Challenge(c) => c,
        other => panic!("expected Challenge, got {other:?}"),
    };
    let blob: serde_json::Value = serde_json::from_str(challenge.details["challenge"].as_str().unwrap()).unwrap();
    assert_eq!(blob["authmethod"], "wampcra");

    let authenticate = joiner.receive_message(Messages::Challenge(challenge)).unwrap().unwrap();
    let reply = acceptor.receive_message(Messages::Authenticate(authenticate)).unwrap();
    assert!(matches!(reply, Messages::Welcome(_)));
    joiner.receive_message(reply).unwrap();
    assert_eq!(joiner.get_session_details().unwrap().authid, "alice");
}

#[test]
fn scenario_2b_cryptosign_join() {
    let (public_key, private_key) = wamp_core::auth::generate_cryptosign_keypair();
    let mut joiner = Joiner::new(
        "realm1",
        Box::new(CryptosignAuthenticator::new("alice", private_key)),
    );
    let hello = joiner.send_hello(None);
    assert_eq!(hello.details["authextra"]["pubkey"], public_key);

    let mut acceptor = Acceptor::new(Some(Box::new(CryptosignRouter { authid: "alice".to_string() })), None);
    let challenge_msg = acceptor.receive_message(Messages::Hello(hello)).unwrap();
    assert!(matches!(challenge_msg, Messages::Challenge(_)));

    let authenticate = joiner.receive_message(challenge_msg).unwrap().unwrap();
    let reply = acceptor.receive_message(Messages::Authenticate(authenticate)).unwrap();
    assert!(matches!(reply, Messages::Welcome(_)));
}

#[test]
fn scenario_3_register_call_yield() {
    let mut dealer = Dealer::new();
    dealer.add_session(SessionDetails::new(1, "realm1", "a", "user")).unwrap();
    dealer.add_session(SessionDetails::new(2, "realm1", "b", "user")).unwrap();

    let registered = dealer
        .receive_register(1, Register { request_id: 1, options: json!({}), procedure: "foo.bar".to_string() })
        .unwrap();
    let registration_id = match registered.message {
        Messages::Registered(r) => {
            assert_eq!(r.request_id, 1);
            r.registration
        }
        other => panic!("expected Registered, got {other:?}"),
    };

    let invocation = dealer
        .receive_call(2, Call { request_id: 2, options: json!({}), procedure: "foo.bar".to_string(), args: json!([]), kwargs: json!({}), payload: None, payload_serializer: None })
        .unwrap();
    let invocation_id = match invocation.message {
        Messages::Invocation(i) => {
            assert_eq!(i.registration, registration_id);
            i.request_id
        }
        other => panic!("expected Invocation, got {other:?}"),
    };

    let result = dealer
        .receive_yield(1, Yield { request_id: invocation_id, options: json!({}), args: json!([]), kwargs: json!({}), payload: None, payload_serializer: None })
        .unwrap();
    match result.message {
        Messages::Result(r) => assert_eq!(r.request_id, 2),
        other => panic!("expected Result, got {other:?}"),
    }

    let second_yield = dealer.receive_yield(1, Yield { request_id: invocation_id, options: json!({}), args: json!([]), kwargs: json!({}), payload: None, payload_serializer: None });
    assert!(second_yield.is_err());
}

#[test]
fn scenario_4_progressive_results() {
    let mut dealer = Dealer::new();
    dealer.add_session(SessionDetails::new(1, "realm1", "a", "user")).unwrap();
    dealer.add_session(SessionDetails::new(2, "realm1", "b", "user")).unwrap();
    dealer
        .receive_register(1, Register { request_id: 1, options: json!({}), procedure: "foo.bar".to_string() })
        .unwrap();

    let invocation = dealer
        .receive_call(2, Call { request_id: 10, options: json!({"receive_progress": true}), procedure: "foo.bar".to_string(), args: json!([]), kwargs: json!({}), payload: None, payload_serializer: None })
        .unwrap();
    let invocation_id = match invocation.message {
        Messages::Invocation(i) => i.request_id,
        other => panic!("expected Invocation, got {other:?}"),
    };

    for _ in 0..10 {
        let result = dealer
            .receive_yield(1, Yield { request_id: invocation_id, options: json!({"progress": true}), args: json!([]), kwargs: json!({}), payload: None, payload_serializer: None })
            .unwrap();
        match result.message {
            Messages::Result(r) => assert_eq!(r.details["progress"], true),
            other => panic!("expected Result, got {other:?}"),
        }
    }

    let terminal = dealer
        .receive_yield(1, Yield { request_id: invocation_id, options: json!({}), args: json!([]), kwargs: json!({}), payload: None, payload_serializer: None })
        .unwrap();
    match terminal.message {
        Messages::Result(r) => assert!(r.details.get("progress").is_none()),
        other => panic!("expected Result, got {other:?}"),
    }

    let unknown = dealer.receive_yield(1, Yield { request_id: invocation_id, options: json!({}), args: json!([]), kwargs: json!({}), payload: None, payload_serializer: None });
    assert!(unknown.is_err());
}

#[test]
fn scenario_5_publish_fan_out() {
    let mut broker = Broker::new();
    broker.add_session(SessionDetails::new(1, "realm1", "s1", "user")).unwrap();
    broker.add_session(SessionDetails::new(2, "realm1", "s2", "user")).unwrap();
    broker.add_session(SessionDetails::new(3, "realm1", "pub", "user")).unwrap();

    broker.receive_subscribe(1, Subscribe { request_id: 1, options: json!({}), topic: "io.xconn.test".to_string() }).unwrap();
    broker.receive_subscribe(2, Subscribe { request_id: 1, options: json!({}), topic: "io.xconn.test".to_string() }).unwrap();

    let publication = broker
        .receive_publish(
            3,
            Publish {
                request_id: 1,
                options: json!({"acknowledge": true}),
                topic: "io.xconn.test".to_string(),
                args: json!([1, 2, 3]),
                kwargs: json!({}),
            },
        )
        .unwrap();

    let mut recipients = publication.recipients.clone();
    recipients.sort();
    assert_eq!(recipients, vec![1, 2]);
    let event = publication.event.unwrap();
    match event {
        Messages::Event(e) => assert_eq!(e.args, json!([1, 2, 3])),
        other => panic!("expected Event, got {other:?}"),
    }
    let ack = publication.ack.unwrap();
    assert_eq!(ack.recipient, 3);
    match ack.message {
        Messages::Published(p) => assert_eq!(p.request_id, 1),
        other => panic!("expected Published, got {other:?}"),
    }
}

#[test]
fn scenario_6_cryptosign_signature_verification() {
    let (public_key, private_key) = wamp_core::auth::generate_cryptosign_keypair();
    let challenge = wamp_core::auth::generate_cryptosign_challenge();
    let signature = wamp_core::auth::sign_cryptosign_challenge(&challenge, &private_key).unwrap();
    assert!(verify_cryptosign_signature(&signature, &public_key).unwrap());

    let mut bytes = signature.into_bytes();
    bytes[0] = if bytes[0] == b'0' { b'1' } else { b'0' };
    let tampered = String::from_utf8(bytes).unwrap();
    assert!(!verify_cryptosign_signature(&tampered, &public_key).unwrap());
}

#[test]
fn invariant_generated_ids_fall_in_range() {
    for _ in 0..2000 {
        let id = generate_session_id();
        assert!(id >= 1 && id <= MAX_ID);
    }
    let mut scope = SessionScopeIdGenerator::new();
    let mut previous = 0;
    for _ in 0..1000 {
        let next = scope.next();
        assert!(next == previous + 1 || (previous == MAX_ID && next == 1));
        previous = next;
    }
}

#[test]
fn invariant_remove_session_cleans_every_dealer_index() {
    let mut dealer = Dealer::new();
    dealer.add_session(SessionDetails::new(1, "realm1", "a", "user")).unwrap();
    dealer.add_session(SessionDetails::new(2, "realm1", "b", "user")).unwrap();
    dealer.receive_register(1, Register { request_id: 1, options: json!({}), procedure: "foo".to_string() }).unwrap();
    dealer.receive_call(2, Call { request_id: 2, options: json!({}), procedure: "foo".to_string(), args: json!([]), kwargs: json!({}), payload: None, payload_serializer: None }).unwrap();

    dealer.remove_session(1);

    // A fresh Register for the same procedure must succeed: the old
    // registration (and its procedure index entry) is fully gone.
    let registered = dealer.receive_register(2, Register { request_id: 3, options: json!({}), procedure: "foo".to_string() });
    assert!(registered.is_ok());
}

#[test]
fn invariant_round_trips_through_every_serializer() {
    let call = Call {
        request_id: 1,
        options: json!({}),
        procedure: "foo.bar".to_string(),
        args: json!([1, "two", 3.0]),
        kwargs: json!({"key": "value"}),
        payload: None,
        payload_serializer: None,
    };
    let message = Messages::from(call);

    let json_serializer = JsonSerializer;
    let encoded = json_serializer.serialize(&message).unwrap();
    let decoded = json_serializer.deserialize(&encoded).unwrap();
    assert_eq!(decoded, message);

    let cbor_serializer = wamp_core::serializers::CborSerializer;
    let encoded = cbor_serializer.serialize(&message).unwrap();
    let decoded = cbor_serializer.deserialize(&encoded).unwrap();
    assert_eq!(decoded, message);

    let msgpack_serializer = wamp_core::serializers::MsgPackSerializer;
    let encoded = msgpack_serializer.serialize(&message).unwrap();
    let decoded = msgpack_serializer.deserialize(&encoded).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn invariant_unknown_tag_is_a_fatal_parse_error_on_every_serializer() {
    let json_serializer = JsonSerializer;
    assert!(json_serializer.deserialize(b"[9999,1,2,3]").is_err());

    let mut cbor_bytes = Vec::new();
    ciborium::into_writer(&serde_json::json!([9999, 1, 2, 3]), &mut cbor_bytes).unwrap();
    let cbor_serializer = wamp_core::serializers::CborSerializer;
    assert!(cbor_serializer.deserialize(&cbor_bytes).is_err());

    let msgpack_bytes = rmp_serde::to_vec(&serde_json::json!([9999, 1, 2, 3])).unwrap();
    let msgpack_serializer = wamp_core::serializers::MsgPackSerializer;
    assert!(msgpack_serializer.deserialize(&msgpack_bytes).is_err());
}

#[test]
fn dealer_receive_message_rejects_unsupported_kinds() {
    let mut dealer = Dealer::new();
    dealer.add_session(SessionDetails::new(1, "realm1", "a", "user")).unwrap();

    let result = dealer.receive_message(1, Messages::from(wamp_core::messages::Goodbye {
        details: json!({}),
        reason: "wamp.close.normal".to_string(),
    }));
    assert!(result.is_err());
}

#[test]
fn call_carries_a_binary_payload_through_to_the_callee() {
    let mut dealer = Dealer::new();
    dealer.add_session(SessionDetails::new(1, "realm1", "callee", "user")).unwrap();
    dealer.add_session(SessionDetails::new(2, "realm1", "caller", "user")).unwrap();
    dealer
        .receive_register(1, Register { request_id: 1, options: json!({}), procedure: "io.xconn.echo".to_string() })
        .unwrap();

    let invocation = dealer
        .receive_call(
            2,
            Call {
                request_id: 5,
                options: json!({}),
                procedure: "io.xconn.echo".to_string(),
                args: Value::Null,
                kwargs: Value::Null,
                payload: Some(b"hello".to_vec()),
                payload_serializer: Some(wamp_core::serializers::JSON_SERIALIZER_ID),
            },
        )
        .unwrap();
    let (invocation_id, registration) = match invocation.message {
        Messages::Invocation(i) => {
            assert_eq!(i.payload.as_deref(), Some(b"hello".as_slice()));
            assert_eq!(i.payload_serializer, Some(wamp_core::serializers::JSON_SERIALIZER_ID));
            assert!(i.args.is_null());
            (i.request_id, i.registration)
        }
        other => panic!("expected Invocation, got {other:?}"),
    };
    let _ = registration;

    let result = dealer
        .receive_yield(
            1,
            Yield {
                request_id: invocation_id,
                options: json!({}),
                args: Value::Null,
                kwargs: Value::Null,
                payload: Some(b"world".to_vec()),
                payload_serializer: Some(wamp_core::serializers::CBOR_SERIALIZER_ID),
            },
        )
        .unwrap();
    match result.message {
        Messages::Result(r) => {
            assert_eq!(r.payload.as_deref(), Some(b"world".as_slice()));
            assert_eq!(r.payload_serializer, Some(wamp_core::serializers::CBOR_SERIALIZER_ID));
        }
        other => panic!("expected Result, got {other:?}"),
    }
}
