//! End-to-end CLI tests for the `tftdesc` binary.
//!
//! Each test lays out a dataset and a spell directory in its own temporary
//! directory, using the default paths, and runs the binary via `assert_cmd`.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a `Command` targeting the cargo-built `tftdesc` binary.
fn tftdesc() -> Command {
    let mut cmd = Command::cargo_bin("tftdesc").unwrap();
    cmd.env_remove("TFTDESC_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn write(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn read(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// A project with a dataset at `web/tft-ko_kr.json` and one spell file.
fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp.path().join("web/tft-ko_kr.json"),
        &json!({
            "items": [
                {"apiName": "TFT_Item_Rod", "name": "곡궁", "desc": "주문력 +@AP@", "effects": {"AP": 10}},
                {"apiName": "TFT14_Augment_Gold", "desc": "@Gold@ 골드"},
                {"desc": "이름 없음"}
            ],
            "sets": {
                "14": {
                    "champions": [
                        {
                            "apiName": "TFT14_Ahri",
                            "ability": {"name": "정기 구슬", "desc": "@TotalDamage@의 마법 피해를 입힙니다.", "icon": "ahri.png"},
                            "cost": 3
                        },
                        {"apiName": "TFT14_Jinx", "ability": {"desc": "로켓 @Rockets@발"}}
                    ],
                    "traits": [
                        {
                            "apiName": "TFT14_Bastion",
                            "desc": "방어력을 얻습니다.<br><br><row>@Armor@ 방어력</row><row>@Armor@ 방어력</row>",
                            "effects": [
                                {"minUnits": 2, "variables": {"Armor": 20}},
                                {"minUnits": 4, "variables": {"Armor": 45}}
                            ]
                        },
                        {"apiName": "TFT14_Blank", "desc": ""}
                    ]
                }
            }
        }),
    );
    write(
        &tmp.path().join("characters/tft14_ahri.cdtb.bin.json"),
        &json!({
            "Characters/TFT14_Ahri/Spells/TFT14_AhriSpell": {
                "mSpell": {
                    "mDataValues": [
                        {"mName": "Damage", "mValues": [0, 180, 270, 400, 0, 0, 0]}
                    ],
                    "mSpellCalculations": {
                        "TotalDamage": {
                            "mFormulaParts": [
                                {"__type": "NamedDataValueCalculationPart", "mDataValue": "Damage"},
                                {"__type": "StatByCoefficientCalculationPart", "mStat": 1, "mCoefficient": 0.2}
                            ]
                        }
                    }
                }
            }
        }),
    );
    tmp
}

// ---------------------------------------------------------------------------
// Batch passes
// ---------------------------------------------------------------------------

#[test]
fn champions_pass_writes_augmented_dataset() {
    let tmp = project();
    tftdesc()
        .arg("champions")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("champions: 2 of 2 rendered"));

    let out = read(&tmp.path().join("web/src/data/sets-modified.json"));
    let ahri = &out["sets"]["14"]["champions"][0];
    assert_eq!(
        ahri["ability"]["modifiedDesc"],
        "180 + 20% AP/270 + 20% AP/400 + 20% AP의 마법 피해를 입힙니다."
    );
    let keys: Vec<&str> = ahri["ability"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["name", "desc", "modifiedDesc", "icon"]);

    // No spell file: the template is carried over untouched.
    let jinx = &out["sets"]["14"]["champions"][1];
    assert_eq!(jinx["ability"]["modifiedDesc"], "로켓 @Rockets@발");

    // Items and traits survive the champion pass untouched.
    assert_eq!(out["items"].as_array().unwrap().len(), 3);

    // Localized text is written as-is, not \u-escaped.
    let raw = fs::read_to_string(tmp.path().join("web/src/data/sets-modified.json")).unwrap();
    assert!(raw.contains("마법 피해"));
}

#[test]
fn items_pass_reports_json() {
    let tmp = project();
    let output = tftdesc()
        .args(["items", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "items failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report[0]["pass"], "items");
    assert_eq!(report[0]["rendered"], 1);
    assert_eq!(report[0]["skipped"], 2);

    let items = read(&tmp.path().join("web/src/data/items-modified.json"));
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2, "items without apiName are dropped");
    assert_eq!(items[0]["modifiedDesc"], "주문력 +10");
    assert!(items[1].get("modifiedDesc").is_none(), "augments stay unmodified");
}

#[test]
fn traits_pass_expands_rows() {
    let tmp = project();
    tftdesc()
        .arg("traits")
        .current_dir(tmp.path())
        .assert()
        .success();

    let out = read(&tmp.path().join("web/src/data/traits-modified.json"));
    let traits = out["sets"]["14"]["traits"].as_array().unwrap();
    assert_eq!(traits.len(), 1);
    assert_eq!(traits[0]["apiName"], "TFT14_Bastion");
    assert_eq!(
        traits[0]["modifiedDesc"],
        "방어력을 얻습니다.\n\n(2) 20 방어력\n\n(4) 45 방어력"
    );
}

#[test]
fn all_passes_honor_output_dir_and_dry_run() {
    let tmp = project();
    tftdesc()
        .args(["all", "--output-dir", "out"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("champions:"))
        .stdout(predicate::str::contains("items:"))
        .stdout(predicate::str::contains("traits:"));
    for name in ["sets-modified.json", "items-modified.json", "traits-modified.json"] {
        assert!(tmp.path().join("out").join(name).is_file(), "{} missing", name);
    }

    let dry = TempDir::new().unwrap();
    tftdesc()
        .args(["all", "--dry-run", "--dataset"])
        .arg(tmp.path().join("web/tft-ko_kr.json"))
        .arg("--characters-dir")
        .arg(tmp.path().join("characters"))
        .current_dir(dry.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(dry run)"));
    assert!(!dry.path().join("web").exists());
}

#[test]
fn env_overrides_output_names() {
    let tmp = project();
    tftdesc()
        .args(["items", "--quiet"])
        .env("TFTDESC_OUTPUTS__ITEMS", "custom-items.json")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(tmp.path().join("web/src/data/custom-items.json").is_file());
}

#[test]
fn config_file_changes_target_field() {
    let tmp = project();
    fs::write(
        tmp.path().join("tftdesc.yaml"),
        "render:\n  target_field: renderedDesc\n  tiers: [2]\n",
    )
    .unwrap();
    tftdesc()
        .arg("champions")
        .current_dir(tmp.path())
        .assert()
        .success();
    let out = read(&tmp.path().join("web/src/data/sets-modified.json"));
    let ability = &out["sets"]["14"]["champions"][0]["ability"];
    assert_eq!(
        ability["renderedDesc"],
        "270 + 20% AP의 마법 피해를 입힙니다."
    );
    assert!(ability.get("modifiedDesc").is_none());
}

// ---------------------------------------------------------------------------
// Inspection commands
// ---------------------------------------------------------------------------

#[test]
fn show_renders_each_kind() {
    let tmp = project();
    tftdesc()
        .args(["show", "TFT14_Ahri"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("champion TFT14_Ahri [rendered]"))
        .stdout(predicate::str::contains("180 + 20% AP/270 + 20% AP/400 + 20% AP"));

    let output = tftdesc()
        .args(["show", "TFT_Item_Rod", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let shown: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["kind"], "item");
    assert_eq!(shown["outcome"], "rendered");
    assert_eq!(shown["record"]["modifiedDesc"], "주문력 +10");

    tftdesc()
        .args(["show", "TFT14_Bastion"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("trait TFT14_Bastion"));
}

#[test]
fn show_unknown_entity_fails() {
    let tmp = project();
    tftdesc()
        .args(["show", "TFT14_Nobody"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no champion, item or trait named 'TFT14_Nobody'"));

    let output = tftdesc()
        .args(["show", "TFT14_Nobody", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    let err: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert!(err["error"].as_str().unwrap().contains("TFT14_Nobody"));
}

#[test]
fn formulas_lists_tiers() {
    let tmp = project();
    tftdesc()
        .args(["formulas", "TFT14_Ahri"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("KEY"))
        .stdout(predicate::str::contains("TIER 3"))
        .stdout(predicate::str::contains("TotalDamage"))
        .stdout(predicate::str::contains("400 + 20% AP"));

    let output = tftdesc()
        .args(["formulas", "TFT14_Ahri", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    let rows: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        rows,
        json!([{
            "key": "TotalDamage",
            "tiers": ["180 + 20% AP", "270 + 20% AP", "400 + 20% AP"]
        }])
    );

    tftdesc()
        .args(["formulas", "TFT14_Jinx"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no spell data for champion 'TFT14_Jinx'"));
}

// ---------------------------------------------------------------------------
// Errors, config and version
// ---------------------------------------------------------------------------

#[test]
fn missing_dataset_fails() {
    let tmp = TempDir::new().unwrap();
    tftdesc()
        .arg("champions")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: cannot load dataset"));
}

#[test]
fn missing_explicit_config_fails() {
    let tmp = TempDir::new().unwrap();
    tftdesc()
        .args(["config", "--config", "nope.yaml"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn invalid_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("tftdesc.yaml"), "render:\n  max_formula_depth: 0\n").unwrap();
    tftdesc()
        .arg("config")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("render.max_formula_depth"));
}

#[test]
fn config_prints_defaults() {
    let tmp = TempDir::new().unwrap();
    let output = tftdesc()
        .args(["config", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let config: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["dataset"], "web/tft-ko_kr.json");
    assert_eq!(config["render"]["max_formula_depth"], 32);
    assert_eq!(config["render"]["tiers"], json!([1, 2, 3]));

    tftdesc()
        .arg("config")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("characters_dir: characters"));
}

#[test]
fn version_and_help() {
    tftdesc()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("tftdesc version "));

    let output = tftdesc().args(["version", "--json"]).output().unwrap();
    let info: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));

    tftdesc()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}
