// md5.rs - MD5 allele digest

use super::traits::AlleleHasher;

/// MD5 hasher producing the `value_md5` digests found in allele headers
#[derive(Debug, Clone, Default)]
pub struct Md5Hasher;

impl AlleleHasher for Md5Hasher {
    fn digest(&self, sequence: &str) -> String {
        format!("{:x}", md5::compute(sequence.as_bytes()))
    }

    fn name(&self) -> &'static str {
        "MD5"
    }

    fn description(&self) -> &'static str {
        "MD5 of the gap-stripped allele sequence (value_md5)"
    }
}
