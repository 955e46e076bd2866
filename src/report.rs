//! Grade-report PDF generation. Layout is deliberately simple: a header with
//! the course identity, then one table row per grade record, flowing onto
//! additional pages as needed.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::domain::types::{Course, Grade};
use crate::error::AulaServiceError;

/// Column headers of the report table.
pub const REPORT_COLUMNS: [&str; 5] = [
    "Estudiante",
    "Corte 1 (30%)",
    "Corte 2 (35%)",
    "Corte 3 (35%)",
    "Nota Final",
];

// US letter.
const PAGE_WIDTH: Mm = Mm(215.9);
const PAGE_HEIGHT: Mm = Mm(279.4);

const COL_X: [Mm; 5] = [Mm(20.0), Mm(78.0), Mm(113.0), Mm(148.0), Mm(183.0)];

fn fmt_score(score: Option<f64>) -> String {
    match score {
        Some(v) => format!("{v:.2}"),
        None => "-".to_owned(),
    }
}

/// Shape grade records into display rows, one per record. Missing scores
/// render as a dash.
pub fn grade_rows(grades: &[Grade]) -> Vec<[String; 5]> {
    grades
        .iter()
        .map(|g| {
            [
                g.student_name.clone(),
                fmt_score(g.corte1),
                fmt_score(g.corte2),
                fmt_score(g.corte3),
                fmt_score(g.final_grade),
            ]
        })
        .collect()
}

fn pdf_err(e: printpdf::Error) -> AulaServiceError {
    AulaServiceError::Internal(anyhow::anyhow!("render pdf: {e}"))
}

fn write_header(layer: &PdfLayerReference, y: Mm, font: &IndirectFontRef) {
    for (text, x) in REPORT_COLUMNS.iter().zip(COL_X) {
        layer.use_text(*text, 10.0, x, y, font);
    }
}

fn write_row(layer: &PdfLayerReference, row: &[String; 5], y: Mm, font: &IndirectFontRef) {
    for (text, x) in row.iter().zip(COL_X) {
        layer.use_text(text.as_str(), 10.0, x, y, font);
    }
}

/// Render the grade report for a course as PDF bytes.
pub fn render_pdf(course: &Course, grades: &[Grade]) -> Result<Vec<u8>, AulaServiceError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new("Reporte de Calificaciones", PAGE_WIDTH, PAGE_HEIGHT, "contenido");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    layer.use_text("Reporte de Calificaciones", 16.0, Mm(20.0), Mm(260.0), &bold);
    layer.use_text(
        format!("Curso: {} ({})", course.name, course.code),
        11.0,
        Mm(20.0),
        Mm(250.0),
        &regular,
    );
    layer.use_text(
        format!("Período: {}", course.academic_period),
        11.0,
        Mm(20.0),
        Mm(244.0),
        &regular,
    );

    let mut y = 232.0;
    write_header(&layer, Mm(y), &bold);
    y -= 8.0;

    for row in grade_rows(grades) {
        if y < 20.0 {
            let (page, page_layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "contenido");
            layer = doc.get_page(page).get_layer(page_layer);
            y = 260.0;
            write_header(&layer, Mm(y), &bold);
            y -= 8.0;
        }
        write_row(&layer, &row, Mm(y), &regular);
        y -= 7.0;
    }

    doc.save_to_bytes().map_err(pdf_err)
}
