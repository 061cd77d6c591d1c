use erasure_protowire::{codec::decode_block_base64, common::Block};
use std::{fs, io, path::Path};

pub const FIXTURE_TX_ID: &str = "2ef328b127c3d719044c54a08c76357eb2c129244b863dbe305328bd5305ec61";
pub const FIXTURE_NAMESPACE: &str = "defaultpolicycc";

#[allow(dead_code)] // Usage by integration tests in ignored by the compiler
pub fn read_to_string(file_path: &str) -> String {
    match fs::read_to_string(file_path) {
        Ok(text) => text,
        Err(e) => match e.kind() {
            io::ErrorKind::NotFound => {
                // In debug mode the working directory is often the top-level workspace folder
                let path = Path::new("redaction");
                fs::read_to_string(path.join(file_path)).unwrap()
            }
            _ => panic!("{}", e),
        },
    }
}

/// Block 28 of a test network: a single endorser transaction writing `a = "90"` and
/// `b = "210"` to `defaultpolicycc`, with no preimage space attached
#[allow(dead_code)]
pub fn endorser_block() -> Block {
    decode_block_base64(&read_to_string("tests/testdata/endorser_block.b64")).unwrap()
}
