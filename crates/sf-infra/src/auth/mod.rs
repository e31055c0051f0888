mod stub_backend;

pub use stub_backend::{
    StubAccountBackend, DEFAULT_KNOWN_EMAIL, DEFAULT_VERIFICATION_CODE,
};
