//! Reader tests against minimal in-memory XLSX archives.
//!
//! Fixtures are assembled directly with `zip` and literal OOXML parts, so
//! the tests exercise the same part walk a real workbook goes through.

use std::io::{Cursor, Write};

use encore_core::CellValue;
use encore_xlsx::{XlsxError, XlsxReader};
use pretty_assertions::assert_eq;

/// A fixture cell: inline string or number
enum Cell {
    Str(&'static str),
    Num(f64),
    Bool(bool),
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn sheet_xml(rows: &[Vec<Cell>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, cell) in row.iter().enumerate() {
            let col = encore_core::CellAddress::column_to_letters(c as u16);
            let cell_ref = format!("{}{}", col, r + 1);
            match cell {
                Cell::Str(s) => xml.push_str(&format!(
                    r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    cell_ref,
                    xml_escape(s)
                )),
                Cell::Num(n) => {
                    xml.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, n))
                }
                Cell::Bool(b) => xml.push_str(&format!(
                    r#"<c r="{}" t="b"><v>{}</v></c>"#,
                    cell_ref,
                    if *b { 1 } else { 0 }
                )),
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Build an XLSX archive in memory from (sheet name, rows) pairs
fn build_xlsx(sheets: &[(&str, Vec<Vec<Cell>>)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();

    let mut content_types = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    );
    for i in 0..sheets.len() {
        content_types.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            i + 1
        ));
    }
    content_types.push_str("</Types>");

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(content_types.as_bytes()).unwrap();

    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
    )
    .unwrap();

    let mut workbook_xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut rels_xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (i, (name, _)) in sheets.iter().enumerate() {
        workbook_xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            xml_escape(name),
            i + 1,
            i + 1
        ));
        rels_xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }
    workbook_xml.push_str("</sheets></workbook>");
    rels_xml.push_str("</Relationships>");

    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(workbook_xml.as_bytes()).unwrap();

    zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
    zip.write_all(rels_xml.as_bytes()).unwrap();

    for (i, (_, rows)) in sheets.iter().enumerate() {
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
            .unwrap();
        zip.write_all(sheet_xml(rows).as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

#[test]
fn reads_values_and_types() {
    let bytes = build_xlsx(&[(
        "Drake_visitas",
        vec![
            vec![Cell::Str("Fecha"), Cell::Str("Visitas")],
            vec![Cell::Str("15 ago. 2024"), Cell::Num(1234567.0)],
            vec![Cell::Str("16 ago. 2024"), Cell::Bool(true)],
        ],
    )]);

    let workbook = XlsxReader::read(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_count(), 1);

    let sheet = workbook.worksheet(0).unwrap();
    assert_eq!(sheet.name(), "Drake_visitas");
    assert_eq!(sheet.get_value_at(0, 0), CellValue::String("Fecha".into()));
    assert_eq!(
        sheet.get_value_at(1, 0),
        CellValue::String("15 ago. 2024".into())
    );
    assert_eq!(sheet.get_value_at(1, 1), CellValue::Number(1234567.0));
    assert_eq!(sheet.get_value_at(2, 1), CellValue::Boolean(true));
    assert_eq!(sheet.get_value_at(9, 9), CellValue::Empty);
}

#[test]
fn preserves_sheet_order() {
    let bytes = build_xlsx(&[
        ("Drake_visitas", vec![]),
        ("Drake_ciudades", vec![]),
        ("Summary", vec![]),
    ]);

    let workbook = XlsxReader::read(Cursor::new(bytes)).unwrap();
    let names: Vec<&str> = workbook.sheet_names().collect();
    assert_eq!(names, vec!["Drake_visitas", "Drake_ciudades", "Summary"]);
}

#[test]
fn reads_shared_strings() {
    // Hand-rolled archive with a sharedStrings part and t="s" cells
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#).unwrap();

    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0"?><workbook xmlns:r="x"><sheets><sheet name="Datos" sheetId="1" r:id="rId1"/></sheets></workbook>"#).unwrap();

    zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
    zip.write_all(br#"<?xml version="1.0"?><Relationships><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#).unwrap();

    zip.start_file("xl/sharedStrings.xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0"?><sst><si><t>Ciudad</t></si><si><t>Bogot&#225;</t></si></sst>"#).unwrap();

    zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0"?><worksheet><sheetData><row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row></sheetData></worksheet>"#).unwrap();

    let bytes = zip.finish().unwrap().into_inner();
    let workbook = XlsxReader::read(Cursor::new(bytes)).unwrap();
    let sheet = workbook.worksheet_by_name("Datos").unwrap();

    assert_eq!(sheet.get_value_at(0, 0), CellValue::String("Ciudad".into()));
    assert_eq!(sheet.get_value_at(0, 1), CellValue::String("Bogotá".into()));
}

#[test]
fn rejects_archive_without_content_types() {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file("not_an_xlsx.txt", options).unwrap();
    zip.write_all(b"hello").unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    match XlsxReader::read(Cursor::new(bytes)) {
        Err(XlsxError::InvalidFormat(_)) => {}
        other => panic!("expected InvalidFormat, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn rejects_non_zip_input() {
    let result = XlsxReader::read(Cursor::new(b"definitely not a zip".to_vec()));
    assert!(matches!(result, Err(XlsxError::Zip(_))));
}
