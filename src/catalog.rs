//! Human-facing descriptions of each validator and a handful of sample
//! inputs that show both verdicts.

use serde::Serialize;

use crate::validators::ValidatorKind;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ValidatorInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub supported_files: &'static [&'static str],
}

pub fn info(kind: ValidatorKind) -> ValidatorInfo {
    match kind {
        ValidatorKind::Filename => ValidatorInfo {
            name: "Filename validation",
            description: "Letters, digits and underscores, one dot, then pdf/docx/xlsx/txt/jpg/png/xml/html",
            supported_files: &[".pdf", ".docx", ".xlsx", ".txt", ".jpg", ".png", ".xml", ".html"],
        },
        ValidatorKind::Content => ValidatorInfo {
            name: "Content validation",
            description: "File header check (PDF: %PDF, DOCX: PK, TXT: letters and digits only)",
            supported_files: &[".pdf", ".docx", ".txt", ".xml", ".html"],
        },
        ValidatorKind::Filetype => ValidatorInfo {
            name: "File type validation",
            description: "Extension category lookup (PDF, DOC/DOCX, images, spreadsheets, text, markup, data)",
            supported_files: &[
                ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".jpg", ".jpeg", ".png", ".gif", ".txt",
                ".xml", ".html",
            ],
        },
        ValidatorKind::Xml => ValidatorInfo {
            name: "XML/HTML validation",
            description: "Opening and closing tags must match in LIFO order",
            supported_files: &[".xml", ".html", ".htm", ".txt"],
        },
        ValidatorKind::Multilevel => ValidatorInfo {
            name: "Multilevel validation",
            description: "Tag structure first, then the nested payload as a filename",
            supported_files: &[".xml", ".html", ".txt", ".pdf", ".docx"],
        },
    }
}

pub fn samples(kind: ValidatorKind) -> &'static [&'static str] {
    match kind {
        ValidatorKind::Filename => &[
            "report_final.pdf",
            "assignment1.docx",
            "data_123.xlsx",
            "report.final.docx",
            "file@new.pdf",
            "document.ppt",
        ],
        ValidatorKind::Content => &[
            "%PDFabc123",
            "PK_random_data",
            "plaintext123",
            "XPDF123",
            "PK@@@",
            "@@@garbage@@@",
        ],
        ValidatorKind::Filetype => &["pdf", "docx", "jpg", "xlsx", "ppt", "mp4"],
        ValidatorKind::Xml => &["<data>HELLO</data>", "<b>123</b>", "<data>HELLO</b>", "<data>123"],
        ValidatorKind::Multilevel => &[
            "<data>HELLO</data>",
            "<b>valid.pdf</b>",
            "<data>invalid.ppt</data>",
            "<data>file@invalid.pdf</data>",
        ],
    }
}
