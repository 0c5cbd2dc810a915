mod certificate;

pub use certificate::{CertificateStatus, CertificateWithCharity, TaxCertificate};
