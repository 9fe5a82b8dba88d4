// mod.rs - Hashers module root

pub mod md5;
pub mod traits;

pub use md5::Md5Hasher;
pub use traits::{strip_gaps, AlleleHasher, GAP_CHAR};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_hasher() {
        let hasher = Md5Hasher;
        let hash1 = hasher.digest("ATCG");
        let hash2 = hasher.digest("ATCG");
        let hash3 = hasher.digest("GCTA");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hash1.len(), 32);
        assert_eq!(hasher.name(), "MD5");
        // Well-known digest of the empty string
        assert_eq!(hasher.digest(""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_gaps_ignored() {
        let hasher = Md5Hasher;
        assert_eq!(strip_gaps("AT-C--G"), "ATCG");
        assert_eq!(hasher.digest_allele("AT-C--G"), hasher.digest("ATCG"));
    }
}
