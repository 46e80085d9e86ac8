//! Template directory fixture

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

pub const SSD1306_JSON: &str = r#"{
    "ssd1306": {
        "options": { "no_bits_in_name": true, "col_cmd": "0x21", "row_cmd": "0x22" },
        "interfaces": { "spi": { "frequency": 8000000 }, "i2c": { "addr": "0x3D" } },
        "bits": {
            "1": {
                "128x64": { "init": ["    0xAE,", "    0xAF,"] },
                "128x32": { "init": ["    0xAE,"], "begin": ["    setContrast(0x7F);"] }
            }
        },
        "functions": {
            "interface_list": ["setStartLine"],
            "setStartLine": { "decl": ["void", "uint8_t line"], "code": ["    m_startLine = line;"] }
        },
        "fields": { "Interface~CONTROLLER~": ["    uint8_t m_startLine = 0;"] }
    }
}"#;

pub const ST7735_JSON: &str = r#"{
    "st7735": {
        "interfaces": { "spi": {} },
        "bits": { "16": { "128x160": { "init": ["    0x01,"] } } }
    }
}"#;

const TEMPLATES: &[(&str, &str)] = &[
    ("copyright.txt", "// copyright\n"),
    ("header.h", "class Interface~CONTROLLER~\n{\n~FUNCS_DECL~~FIELDS_DECL~\n};\n"),
    ("header.inl", "~FUNCS_DEF~"),
    ("display.h", "class Display~CONTROLLER~~EXBITS~ {} // bits ~BITS~\n"),
    ("resolution.h", "class Display~CONTROLLER~_~RESOLUTION~ ~WIDTH~ ~HEIGHT~\n"),
    ("resolution.inl", "init ~RESOLUTION~:\n~INIT~\nbegin:~OPTIONAL_CONFIG~\n"),
    ("display_spi.h", "spi ~RESOLUTION~ ~SERIAL_INTERFACE_ARGS~ | ~CUSTOM_INTERFACE_ARGS~\n"),
    ("display_spi.cpp", "spi.cpp ~RESOLUTION~ ~FREQUENCY~\n"),
    ("display_i2c.h", "i2c ~RESOLUTION~ ~SERIAL_INTERFACE_ARGS~ ~I2C_ADDR~\n"),
    ("footer.h", "// end\n"),
    ("functions/Interface~CONTROLLER~/decl", "\nI &intf\nint8_t dc\n"),
    ("functions/Interface~CONTROLLER~/init", "I(intf)\nm_dc(dc)\n"),
    ("functions/endBlock/code", "    this->stop();\n"),
    ("fields/Interface~CONTROLLER~", "    uint8_t m_rotation = 0;\n"),
    ("lcd/ssd1306/ssd1306.json", SSD1306_JSON),
    ("lcd/st7735/st7735.json", ST7735_JSON),
    ("lcd/st7735/functions/endBlock/code", "    this->end();\n"),
    // too short to be a controller directory
    ("lcd/abc/abc.json", "not json"),
];

/// Unique scratch directory below the system temp dir
pub fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lcdgfx_codegen_{name}_{}", std::process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Writes the template fixture to `<dir>/templates`.
pub fn templates(dir: &Path) -> PathBuf {
    let root = dir.join("templates");
    for (name, content) in TEMPLATES {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    root
}
