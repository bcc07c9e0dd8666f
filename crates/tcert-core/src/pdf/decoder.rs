//! PDF text decoding using lopdf and pdf-extract.

use std::borrow::Cow;

use lopdf::Document;
use tracing::debug;

use super::{Result, TextDecoder};
use crate::error::PdfError;
use crate::models::lines::LineSequence;

/// Decodes text-based PDFs page by page.
#[derive(Debug, Clone, Default)]
pub struct PdfTextDecoder;

impl PdfTextDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Validate the document structure and return bytes pdf-extract can read.
    fn prepare<'a>(&self, data: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.get_pages().is_empty() {
            return Err(PdfError::NoPages);
        }

        if !doc.is_encrypted() {
            return Ok(Cow::Borrowed(data));
        }

        // Handle PDFs with empty password encryption
        if doc.decrypt("").is_err() {
            return Err(PdfError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");

        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
        Ok(Cow::Owned(decrypted))
    }
}

impl TextDecoder for PdfTextDecoder {
    fn decode_to_lines(&self, data: &[u8]) -> Result<LineSequence> {
        let raw = self.prepare(data)?;

        let pages = pdf_extract::extract_text_from_mem_by_pages(&raw)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let lines = LineSequence::from_pages(&pages);
        debug!("Decoded {} pages into {} lines", pages.len(), lines.len());
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::encryption::{decrypt_object, get_encryption_key};
    use lopdf::{dictionary, Object, ObjectId, Stream};

    // Helper to create a simple PDF with one text line per page
    fn create_test_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut kids = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![100.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => count }),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    // RC4 standard security handler keyed on the empty user password.
    // Without `user_hash` there is no U entry, so any password authenticates.
    fn encrypt_test_pdf(data: &[u8], user_hash: Option<&[u8]>) -> Vec<u8> {
        let mut doc = Document::load_mem(data).unwrap();

        let mut encrypt = dictionary! {
            "Filter" => "Standard",
            "V" => 2,
            "R" => 2,
            "Length" => 40,
            "O" => Object::string_literal(vec![0x11u8; 32]),
            "P" => -4,
            "CF" => dictionary! { "StdCF" => dictionary! { "CFM" => "V2" } },
        };
        if let Some(hash) = user_hash {
            encrypt.set("U", Object::string_literal(hash.to_vec()));
        }
        let encrypt_id = doc.add_object(encrypt);
        doc.trailer.set("Encrypt", encrypt_id);
        let file_id = Object::string_literal(b"tcert-test-file-id".to_vec());
        doc.trailer.set("ID", vec![file_id.clone(), file_id]);

        // RC4 is symmetric, so decrypting plaintext encrypts it
        let key = get_encryption_key(&doc, "", false).unwrap();
        let stream_ids: Vec<ObjectId> = doc
            .objects
            .iter()
            .filter(|(_, obj)| matches!(obj, Object::Stream(_)))
            .map(|(id, _)| *id)
            .collect();
        for id in stream_ids {
            let encrypted = decrypt_object(&key, id, doc.get_object(id).unwrap(), false).unwrap();
            if let Ok(Object::Stream(stream)) = doc.get_object_mut(id) {
                stream.set_content(encrypted);
            }
        }

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_decode_pages_in_order() {
        let data = create_test_pdf(&["Shipped to :", "Acme Corp"]);
        let lines = PdfTextDecoder::new().decode_to_lines(&data).unwrap();
        assert_eq!(lines.as_slice(), ["Shipped to :", "Acme Corp"]);
    }

    #[test]
    fn test_malformed_pdf_is_parse_error() {
        let err = PdfTextDecoder::new()
            .decode_to_lines(b"definitely not a pdf")
            .unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_pdf_without_pages() {
        let data = create_test_pdf(&[]);
        let err = PdfTextDecoder::new().decode_to_lines(&data).unwrap_err();
        assert!(matches!(err, PdfError::NoPages));
    }

    #[test]
    fn test_empty_password_pdf_is_decrypted() {
        let data = encrypt_test_pdf(&create_test_pdf(&["Shipped to :", "Acme Corp"]), None);
        assert!(Document::load_mem(&data).unwrap().is_encrypted());

        let lines = PdfTextDecoder::new().decode_to_lines(&data).unwrap();
        assert_eq!(lines.as_slice(), ["Shipped to :", "Acme Corp"]);
    }

    #[test]
    fn test_password_protected_pdf_is_rejected() {
        let data = encrypt_test_pdf(&create_test_pdf(&["Shipped to :"]), Some(&[0u8; 32]));
        let err = PdfTextDecoder::new().decode_to_lines(&data).unwrap_err();
        assert!(matches!(err, PdfError::Encrypted));
    }
}
