//! Integration tests for eagle-panel
//!
//! These run whole boards through the batch driver and read the written
//! panels back.

use approx::assert_relative_eq;
use eagle_panel::{
    config::{BlankConfig, Config, LayoutOptions},
    converter::{generate_blank_panel, Converter},
    eagle::{load_eagle_file, Eagle},
    error::{exit_code_for, ErrorKind},
    format::FormatKind,
};
use std::{fs, path::PathBuf};
use tempfile::TempDir;

const LAYERS: &str = r#"<layers>
<layer number="1" name="Top" color="4" fill="1" visible="yes" active="yes"/>
<layer number="16" name="Bottom" color="1" fill="1" visible="yes" active="yes"/>
<layer number="20" name="Dimension" color="24" fill="1" visible="yes" active="yes"/>
<layer number="25" name="tNames" color="7" fill="1" visible="yes" active="yes"/>
<layer number="29" name="tStop" color="7" fill="3" visible="no" active="yes"/>
<layer number="39" name="tKeepout" color="4" fill="11" visible="yes" active="yes"/>
</layers>"#;

/// A 10HP-wide, 100mm-tall board at an arbitrary origin
fn board_xml(board_attributes: &str, elements: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE eagle SYSTEM "eagle.dtd">
<eagle version="9.6.2">
<drawing>
<grid distance="0.1" unitdist="inch" unit="inch" style="lines"/>
{LAYERS}
<board>
<plain>
<wire x1="10" y1="5" x2="60.8" y2="5" width="0" layer="20"/>
<wire x1="60.8" y1="5" x2="60.8" y2="105" width="0" layer="20"/>
<wire x1="60.8" y1="105" x2="10" y2="105" width="0" layer="20"/>
<wire x1="10" y1="105" x2="10" y2="5" width="0" layer="20"/>
<wire x1="0" y1="0" x2="90" y2="0" width="0.254" layer="20"/>
</plain>
<libraries/>
<attributes>
{board_attributes}
</attributes>
<elements>
{elements}
</elements>
<signals/>
</board>
</drawing>
</eagle>
"#
    )
}

const CONTROLS: &str = r#"
<element name="VR1" library="pots" package="ALPHA9MM" value="100k" x="30" y="55">
<attribute name="PANEL_DRILL_MM" value="7"/>
<attribute name="PANEL_LEGEND" value="CUTOFF"/>
<attribute name="PANEL_LEGEND_TICKS" value="yes"/>
</element>
<element name="J1" library="jacks" package="THONKICONN" value="IN" x="20" y="20">
<attribute name="PANEL_DRILL_MM" value="6"/>
<attribute name="PANEL_LEGEND_LOCATION" value="below"/>
</element>
<element name="R1" library="rcl" package="0805" value="10k" x="40" y="40"/>
"#;

fn write_board(dir: &TempDir, name: &str, xml: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, xml).expect("Failed to write test board");
    path
}

fn create_test_config(files: Vec<PathBuf>, output_dir: PathBuf) -> Config {
    Config {
        files,
        format: FormatKind::Eurorack,
        spec_file: None,
        layout: LayoutOptions::default(),
        output_dir,
        verbose: false,
        no_progress: true,
    }
}

fn texts(panel: &Eagle) -> Vec<&str> {
    panel
        .board
        .plain
        .texts
        .iter()
        .map(|t| t.text.as_str())
        .collect()
}

#[test]
fn test_eurorack_panel_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = write_board(
        &dir,
        "vcf.brd",
        &board_xml(r#"<attribute name="PANEL_HEADER_TEXT" value="VCF"/>"#, CONTROLS),
    );
    let out = dir.path().join("out");

    let mut converter = Converter::new(create_test_config(vec![input], out.clone()));
    converter.run().unwrap();

    let stats = converter.get_conversion_stats();
    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.layout.holes, 2);
    assert_eq!(stats.layout.legends_placed, 2);

    let panel = load_eagle_file(out.join("vcf.brd.panel.brd")).unwrap();
    assert_eq!(panel.layers.len(), 6);
    assert!(panel.board.elements.is_empty());

    let plain = &panel.board.plain;
    // 4 mounting holes for 10HP, then VR1 and J1
    assert_eq!(plain.holes.len(), 6);
    let vr1 = &plain.holes[4];
    assert_eq!(vr1.drill, 7.0);
    // board x 10..60.8 moves to 0..50.8, plus half the horizontal fit
    assert_relative_eq!(vr1.x, 20.125, epsilon = 1e-6);
    // board y 5..105 is centred on a 128.5mm panel
    assert_relative_eq!(vr1.y, 64.25, epsilon = 1e-6);

    assert_eq!(texts(&panel), vec!["VCF", "<FOOTER>", "CUTOFF", "J1"]);
    let j1_legend = &plain.texts[3];
    assert_eq!(j1_legend.align.as_deref(), Some("top-center"));
    assert_relative_eq!(j1_legend.y, plain.holes[5].y - 6.5, epsilon = 1e-6);

    // 4 outline wires plus 11 default ticks
    assert_eq!(plain.wires.len(), 15);
    assert_eq!(plain.circles.len(), 2);
    assert_eq!(plain.polygons.len(), 2);
    assert_eq!(plain.rectangles.len(), 2);
}

#[test]
fn test_batch_processes_every_file() {
    let dir = TempDir::new().unwrap();
    let a = write_board(&dir, "a.brd", &board_xml("", CONTROLS));
    let b = write_board(&dir, "b.brd", &board_xml("", ""));

    let mut converter = Converter::new(create_test_config(vec![a, b], dir.path().to_path_buf()));
    converter.run().unwrap();

    assert_eq!(converter.get_conversion_stats().files_processed, 2);
    assert!(dir.path().join("a.brd.panel.brd").is_file());
    let empty = load_eagle_file(dir.path().join("b.brd.panel.brd")).unwrap();
    assert_eq!(texts(&empty), vec!["<HEADER>", "<FOOTER>"]);
}

#[test]
fn test_bad_attribute_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    let bad = write_board(
        &dir,
        "bad.brd",
        &board_xml(
            "",
            r#"<element name="VR9" library="pots" package="P" value="1k" x="30" y="50">
<attribute name="PANEL_DRILL_MM" value="seven"/>
</element>"#,
        ),
    );
    let later = write_board(&dir, "later.brd", &board_xml("", ""));

    let mut converter = Converter::new(create_test_config(
        vec![bad, later],
        dir.path().to_path_buf(),
    ));
    let err = converter.run().unwrap_err();

    assert_eq!(exit_code_for(&err), ErrorKind::AttributeParse.exit_code());
    let message = format!("{:#}", err);
    assert!(message.contains("VR9"), "{message}");
    assert!(message.contains("PANEL_DRILL_MM"), "{message}");
    assert!(!dir.path().join("bad.brd.panel.brd").exists());
    assert!(!dir.path().join("later.brd.panel.brd").exists());
    assert_eq!(converter.get_conversion_stats().files_processed, 0);
}

#[test]
fn test_tick_label_mismatch_is_geometry_error() {
    let dir = TempDir::new().unwrap();
    let input = write_board(
        &dir,
        "ticks.brd",
        &board_xml(
            "",
            r#"<element name="VR2" library="pots" package="P" value="1k" x="30" y="50">
<attribute name="PANEL_DRILL_MM" value="7"/>
<attribute name="PANEL_LEGEND_TICKS" value="yes"/>
<attribute name="PANEL_LEGEND_TICKS_COUNT" value="5"/>
<attribute name="PANEL_LEGEND_TICKS_LABELS_TEXTS" value="0,2,4,6"/>
</element>"#,
        ),
    );
    let mut converter = Converter::new(create_test_config(vec![input], dir.path().to_path_buf()));
    let err = converter.run().unwrap_err();
    assert_eq!(exit_code_for(&err), ErrorKind::GeometryPrecondition.exit_code());
    assert!(!dir.path().join("ticks.brd.panel.brd").exists());
}

#[test]
fn test_spec_format_panel() {
    let dir = TempDir::new().unwrap();
    let spec = dir.path().join("box.yaml");
    fs::write(
        &spec,
        "name: hammond-1590b\nwidth: 60\nheight: 112\nmountingHoleDiameter: 3.5\n\
         horizontalFit: 0\ncornerRadius: 4\nmountingHoles:\n\
         - { x: 6, y: 106 }\n- { x: 6, y: 6 }\n- { x: 54, y: 106 }\n- { x: 54, y: 6 }\n",
    )
    .unwrap();
    let input = write_board(&dir, "fx.brd", &board_xml("", CONTROLS));

    let mut config = create_test_config(vec![input], dir.path().to_path_buf());
    config.format = FormatKind::Spec;
    config.spec_file = Some(spec);
    Converter::new(config).run().unwrap();

    let panel = load_eagle_file(dir.path().join("fx.brd.panel.brd")).unwrap();
    let plain = &panel.board.plain;
    assert_eq!(plain.holes.len(), 6);
    assert!(plain.holes[..4].iter().all(|h| h.drill == 3.5));
    // rounded outline, no rail keepouts
    assert_eq!(plain.wires.iter().filter(|w| w.layer == 20).count(), 8);
    assert!(plain.rectangles.is_empty());
    // header sits on the first hole row after sorting by y
    assert_eq!(plain.texts[0].y, 6.0);
    assert_eq!(plain.texts[1].y, 106.0);
}

#[test]
fn test_blank_panel() {
    let dir = TempDir::new().unwrap();
    let reference = write_board(&dir, "ref.brd", &board_xml("", CONTROLS));
    let output = dir.path().join("blank.brd");
    let config = BlankConfig {
        width: 4,
        format: FormatKind::Intellijel,
        reference_board: reference,
        output: output.clone(),
        spec_file: None,
        verbose: false,
    };
    generate_blank_panel(&config).unwrap();

    let panel = load_eagle_file(&output).unwrap();
    let plain = &panel.board.plain;
    assert_eq!(plain.holes.len(), 4);
    assert_eq!(plain.wires.len(), 4);
    assert_relative_eq!(plain.wires[2].x1, 20.195, epsilon = 1e-6);
    assert!(plain.texts.is_empty());
    assert!(panel.board.elements.is_empty());
}

#[test]
fn test_blank_panel_missing_reference() {
    let dir = TempDir::new().unwrap();
    let config = BlankConfig {
        width: 4,
        format: FormatKind::Eurorack,
        reference_board: dir.path().join("nope.brd"),
        output: dir.path().join("blank.brd"),
        spec_file: None,
        verbose: false,
    };
    assert!(generate_blank_panel(&config).is_err());
    assert!(!dir.path().join("blank.brd").exists());
}
