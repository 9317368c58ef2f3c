//! Request envelope vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use bytes::Bytes;

use hello_rpc_core::protocol::decode_request;

mod vector_loader;
use vector_loader::load;

#[test]
fn request_vectors() {
    let files = [
        "request_min.json",
        "request_full.json",
        "request_bad_version.json",
        "request_wide_version.json",
        "request_unknown_field.json",
        "request_empty_op.json",
        "request_not_json.json",
    ];

    for f in files {
        let v = load(f);
        let res = decode_request(Bytes::from(v.body.clone()));

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.client_code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let req = res.expect("expected ok request");
        let ex = v.expect.expect("missing expect block");

        assert_eq!(req.v, 1, "vector={}", v.description);
        assert_eq!(req.op, ex["op"].as_str().unwrap(), "vector={}", v.description);
        assert_eq!(req.id.as_deref(), ex["id"].as_str(), "vector={}", v.description);
        assert_eq!(
            req.args.is_some(),
            ex["has_args"].as_bool().unwrap(),
            "vector={}",
            v.description
        );
    }
}
