//! ANS-104 data items, the upload transaction unit Bundlr bundles onto
//! Arweave.
//!
//! A data item is priced by its full serialized size (header + tags +
//! payload), so [`DataItem::size`] is exact before signing. Signing covers
//! the Arweave deep hash of the item fields with the owner's ed25519 key;
//! the item id is the SHA-256 of the signature, base64url-encoded.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use sha2::{Digest, Sha256, Sha384};
use solana_keypair::Keypair;
use solana_pubkey::Pubkey;
use solana_signer::Signer;

use crate::error::StorageError;

/// ANS-104 signature type for ed25519 (Solana) owners.
pub const SIGNATURE_TYPE_ED25519: u16 = 2;
/// ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;
/// ed25519 public key length.
pub const OWNER_LENGTH: usize = 32;

/// Fixed header bytes ahead of the tag section: signature type (2),
/// signature (64), owner (32), target marker (1), anchor marker (1),
/// tag count (8), tag byte count (8).
const HEADER_LENGTH: usize = 2 + SIGNATURE_LENGTH + OWNER_LENGTH + 1 + 1 + 8 + 8;

/// A name/value tag attached to a data item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// A `Content-Type` tag inferred from a file extension, when the
    /// extension is one the maintainer scripts actually upload.
    pub fn content_type_for_path(path: &std::path::Path) -> Option<Tag> {
        let mime = match path.extension()?.to_str()? {
            "json" => "application/json",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "svg" => "image/svg+xml",
            _ => return None,
        };
        Some(Tag::new("Content-Type", mime))
    }
}

/// An unsigned or signed data item owned by a Solana pubkey.
#[derive(Debug, Clone)]
pub struct DataItem {
    owner: Pubkey,
    tags: Vec<Tag>,
    data: Vec<u8>,
    signature: Option<[u8; SIGNATURE_LENGTH]>,
}

impl DataItem {
    /// Build an unsigned item from payload bytes. No target or anchor is
    /// set; the maintainer flow never uses either.
    pub fn new(owner: Pubkey, data: Vec<u8>, tags: Vec<Tag>) -> Self {
        Self {
            owner,
            tags,
            data,
            signature: None,
        }
    }

    pub fn owner(&self) -> &Pubkey {
        &self.owner
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Serialized size in bytes. Valid before signing; this is the size
    /// the node prices.
    pub fn size(&self) -> u64 {
        (HEADER_LENGTH + self.tag_bytes().len() + self.data.len()) as u64
    }

    /// The deep-hash digest the owner signs.
    pub fn signing_message(&self) -> [u8; 48] {
        let sig_type = SIGNATURE_TYPE_ED25519.to_string();
        let tag_bytes = self.tag_bytes();
        deep_hash_list(&[
            b"dataitem",
            b"1",
            sig_type.as_bytes(),
            self.owner.as_ref(),
            b"", // target
            b"", // anchor
            &tag_bytes,
            &self.data,
        ])
    }

    /// Sign the item. The keypair must be the owner the item was built
    /// with, since the node verifies the signature against the owner field.
    pub fn sign(&mut self, keypair: &Keypair) -> Result<(), StorageError> {
        if keypair.pubkey() != self.owner {
            return Err(StorageError::OwnerMismatch {
                owner: self.owner,
                signer: keypair.pubkey(),
            });
        }
        let message = self.signing_message();
        let signature = keypair.sign_message(&message);
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes.copy_from_slice(signature.as_ref());
        self.signature = Some(bytes);
        Ok(())
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// The item id: base64url(sha256(signature)). Only defined once signed.
    pub fn id(&self) -> Option<String> {
        self.signature
            .map(|sig| URL_SAFE_NO_PAD.encode(Sha256::digest(sig)))
    }

    /// Serialize the signed item into the binary form `POST /tx/{currency}`
    /// expects.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StorageError> {
        let signature = self.signature.ok_or(StorageError::Unsigned)?;
        let tag_bytes = self.tag_bytes();

        let mut out = Vec::with_capacity(HEADER_LENGTH + tag_bytes.len() + self.data.len());
        out.extend_from_slice(&SIGNATURE_TYPE_ED25519.to_le_bytes());
        out.extend_from_slice(&signature);
        out.extend_from_slice(self.owner.as_ref());
        out.push(0); // no target
        out.push(0); // no anchor
        out.extend_from_slice(&(self.tags.len() as u64).to_le_bytes());
        out.extend_from_slice(&(tag_bytes.len() as u64).to_le_bytes());
        out.extend_from_slice(&tag_bytes);
        out.extend_from_slice(&self.data);
        Ok(out)
    }

    /// Avro-encoded tag block: array count, (name, value) string pairs,
    /// zero terminator. An empty tag list encodes to zero bytes.
    fn tag_bytes(&self) -> Vec<u8> {
        if self.tags.is_empty() {
            return Vec::new();
        }
        let mut buf = Vec::new();
        avro_long(&mut buf, self.tags.len() as i64);
        for tag in &self.tags {
            avro_string(&mut buf, &tag.name);
            avro_string(&mut buf, &tag.value);
        }
        buf.push(0);
        buf
    }
}

// ─── Avro primitives ─────────────────────────────────────────────────────────

fn avro_long(buf: &mut Vec<u8>, n: i64) {
    let mut z = ((n << 1) ^ (n >> 63)) as u64;
    loop {
        let byte = (z & 0x7f) as u8;
        z >>= 7;
        if z == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
}

fn avro_string(buf: &mut Vec<u8>, s: &str) {
    avro_long(buf, s.len() as i64);
    buf.extend_from_slice(s.as_bytes());
}

// ─── Arweave deep hash (SHA-384) ─────────────────────────────────────────────

fn sha384(data: &[u8]) -> [u8; 48] {
    Sha384::digest(data).into()
}

fn deep_hash_blob(blob: &[u8]) -> [u8; 48] {
    let mut tag = Vec::with_capacity(24);
    tag.extend_from_slice(b"blob");
    tag.extend_from_slice(blob.len().to_string().as_bytes());

    let mut outer = Sha384::new();
    outer.update(sha384(&tag));
    outer.update(sha384(blob));
    outer.finalize().into()
}

fn deep_hash_list(blobs: &[&[u8]]) -> [u8; 48] {
    let mut tag = Vec::with_capacity(24);
    tag.extend_from_slice(b"list");
    tag.extend_from_slice(blobs.len().to_string().as_bytes());

    let mut acc = sha384(&tag);
    for blob in blobs {
        let mut hasher = Sha384::new();
        hasher.update(acc);
        hasher.update(deep_hash_blob(blob));
        acc = hasher.finalize().into();
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_signature::Signature;

    fn signed_item(tags: Vec<Tag>) -> (Keypair, DataItem) {
        let keypair = Keypair::new();
        let mut item = DataItem::new(keypair.pubkey(), b"{\"name\":\"WL Token\"}".to_vec(), tags);
        item.sign(&keypair).unwrap();
        (keypair, item)
    }

    #[test]
    fn test_size_matches_serialized_length() {
        let (_, item) = signed_item(vec![Tag::new("Content-Type", "application/json")]);
        assert_eq!(item.size(), item.to_bytes().unwrap().len() as u64);
    }

    #[test]
    fn test_size_known_before_signing() {
        let keypair = Keypair::new();
        let item = DataItem::new(keypair.pubkey(), vec![0u8; 100], Vec::new());
        // header only + payload: no tags contribute zero bytes
        assert_eq!(item.size(), (2 + 64 + 32 + 1 + 1 + 8 + 8 + 100) as u64);
    }

    #[test]
    fn test_binary_layout() {
        let (keypair, item) = signed_item(Vec::new());
        let bytes = item.to_bytes().unwrap();

        // signature type 2, little-endian
        assert_eq!(&bytes[0..2], &[2, 0]);
        // owner follows the signature
        assert_eq!(&bytes[66..98], keypair.pubkey().as_ref());
        // no target, no anchor
        assert_eq!(bytes[98], 0);
        assert_eq!(bytes[99], 0);
        // zero tags, zero tag bytes
        assert_eq!(&bytes[100..108], &0u64.to_le_bytes());
        assert_eq!(&bytes[108..116], &0u64.to_le_bytes());
        // payload is everything after the header
        assert_eq!(&bytes[116..], item.data());
    }

    #[test]
    fn test_signature_verifies_over_signing_message() {
        let (keypair, item) = signed_item(vec![Tag::new("Content-Type", "application/json")]);
        let bytes = item.to_bytes().unwrap();

        let signature = Signature::try_from(&bytes[2..66]).unwrap();
        let message = item.signing_message();
        assert!(signature.verify(keypair.pubkey().as_ref(), &message));
    }

    #[test]
    fn test_id_is_base64url_sha256_of_signature() {
        let (_, item) = signed_item(Vec::new());
        let bytes = item.to_bytes().unwrap();

        let expected = URL_SAFE_NO_PAD.encode(Sha256::digest(&bytes[2..66]));
        let id = item.id().unwrap();
        assert_eq!(id, expected);
        assert_eq!(id.len(), 43);
        assert!(!id.contains('+') && !id.contains('/') && !id.contains('='));
    }

    #[test]
    fn test_unsigned_item_has_no_id_and_no_bytes() {
        let keypair = Keypair::new();
        let item = DataItem::new(keypair.pubkey(), vec![1, 2, 3], Vec::new());
        assert!(item.id().is_none());
        assert!(matches!(item.to_bytes(), Err(StorageError::Unsigned)));
    }

    #[test]
    fn test_sign_rejects_foreign_keypair() {
        let owner = Keypair::new();
        let other = Keypair::new();
        let mut item = DataItem::new(owner.pubkey(), vec![1], Vec::new());
        assert!(item.sign(&other).is_err());
        assert!(!item.is_signed());
    }

    #[test]
    fn test_avro_tag_encoding() {
        let (_, item) = signed_item(vec![
            Tag::new("Content-Type", "application/json"),
            Tag::new("App-Name", "token-maintainer"),
        ]);
        let bytes = item.to_bytes().unwrap();
        assert_eq!(&bytes[100..108], &2u64.to_le_bytes());

        let tag_len = u64::from_le_bytes(bytes[108..116].try_into().unwrap()) as usize;
        let avro = &bytes[116..116 + tag_len];
        // zigzag(2) = 4 leads the array block
        assert_eq!(avro[0], 4);
        // zigzag(12) = 24 prefixes "Content-Type"
        assert_eq!(avro[1], 24);
        assert_eq!(&avro[2..14], b"Content-Type");
        // block terminator
        assert_eq!(avro[tag_len - 1], 0);
    }

    #[test]
    fn test_avro_long_zigzag() {
        let mut buf = Vec::new();
        avro_long(&mut buf, 0);
        avro_long(&mut buf, 1);
        avro_long(&mut buf, -1);
        avro_long(&mut buf, 64);
        assert_eq!(buf, vec![0, 2, 1, 0x80, 1]);
    }

    #[test]
    fn test_deep_hash_changes_with_any_field() {
        let keypair = Keypair::new();
        let base = DataItem::new(keypair.pubkey(), vec![1, 2, 3], Vec::new());
        let other_data = DataItem::new(keypair.pubkey(), vec![1, 2, 4], Vec::new());
        let other_tags = DataItem::new(
            keypair.pubkey(),
            vec![1, 2, 3],
            vec![Tag::new("a", "b")],
        );
        assert_ne!(base.signing_message(), other_data.signing_message());
        assert_ne!(base.signing_message(), other_tags.signing_message());

        let other_owner = DataItem::new(Keypair::new().pubkey(), vec![1, 2, 3], Vec::new());
        assert_ne!(base.signing_message(), other_owner.signing_message());
    }

    #[test]
    fn test_content_type_for_path() {
        use std::path::Path;
        let tag = Tag::content_type_for_path(Path::new("./files/wl-token-metadata.json")).unwrap();
        assert_eq!(tag.value, "application/json");
        let tag = Tag::content_type_for_path(Path::new("./files/spaf-token-logo.png")).unwrap();
        assert_eq!(tag.value, "image/png");
        assert!(Tag::content_type_for_path(Path::new("wallet.key")).is_none());
    }
}
