mod rls;
mod sensitive;

pub use rls::RlsAnalyzer;
pub use sensitive::SensitiveFieldScanner;
