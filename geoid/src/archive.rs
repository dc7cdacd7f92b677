//! Lecture des fichiers de grille (bruts ou compressés .bz2)

use bzip2::read::BzDecoder;
use std::io::Read;
use std::path::Path;

use crate::GeoidError;

/// Signature d'un flux bzip2 ("BZh")
const BZIP2_MAGIC: &[u8] = b"BZh";

/// Lit un fichier de grille en mémoire, décompressé si nécessaire
///
/// # Arguments
///
/// * `path` - Chemin vers le fichier `.isg`, `.asc` ou leur version `.bz2`
pub fn read(path: &Path) -> Result<Vec<u8>, GeoidError> {
    let raw = std::fs::read(path)?;
    decompress(raw)
}

/// Décompresse un contenu bzip2 ; renvoie le contenu inchangé sinon
pub fn decompress(raw: Vec<u8>) -> Result<Vec<u8>, GeoidError> {
    if !raw.starts_with(BZIP2_MAGIC) {
        return Ok(raw);
    }

    let mut content = Vec::with_capacity(raw.len() * 4);
    BzDecoder::new(raw.as_slice()).read_to_end(&mut content)?;
    tracing::debug!(
        compressed = raw.len(),
        decompressed = content.len(),
        "bzip2 grid decompressed"
    );
    Ok(content)
}
