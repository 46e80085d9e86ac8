//! Controller descriptors.
//!
//! Every `templates/lcd/<name>/<name>.json` file is a JSON object mapping controller names to a
//! [`ControllerSpec`]:
//!
//! ```json
//! {
//!     "ssd1306": {
//!         "options": { "no_bits_in_name": true, "col_cmd": "0x21", "row_cmd": "0x22" },
//!         "interfaces": { "spi": { "frequency": 8000000 }, "i2c": {} },
//!         "bits": { "1": { "128x64": { "init": ["    0xAE,"] } } },
//!         "functions": { "interface_list": ["setStartLine"], "setStartLine": { "decl": ["void", "uint8_t line"] } }
//!     }
//! }
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{CodegenError, OrderedMap, Result};

/// Controller options. Everything has a default, descriptors only list what differs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Class names omit the `x<bits>` suffix
    pub no_bits_in_name: bool,
    /// Set block arguments are sent in command mode
    pub args_in_cmd_mode: bool,
    /// Width of the row / column arguments, 16 sends a leading zero byte
    pub rowcol_bits: u32,
    pub col_cmd: String,
    pub row_cmd: String,
    /// Divider applied to column addresses
    pub column_div: u32,
    /// Command sent after the set block arguments
    pub exit_cmd_mode_command: Option<String>,
    pub config_func: String,
    pub reset_duration: u32,
    pub reset_delay: u32,
    pub use_paging: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            no_bits_in_name: false,
            args_in_cmd_mode: false,
            rowcol_bits: 8,
            col_cmd: "0x22".to_string(),
            row_cmd: "0x72".to_string(),
            column_div: 1,
            exit_cmd_mode_command: None,
            config_func: "_configureSpiDisplay".to_string(),
            reset_duration: 20,
            reset_delay: 100,
            use_paging: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterfaceSpec {
    #[serde(default = "default_frequency")]
    pub frequency: u64,

    /// I2C address, only used for the `i2c` interface
    #[serde(default = "default_i2c_addr")]
    pub addr: String,
}

fn default_frequency() -> u64 {
    4_400_000
}

fn default_i2c_addr() -> String {
    "0x3C".to_string()
}

/// Initialization of one resolution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolutionSpec {
    /// Lines of the init sequence (`~INIT~`)
    pub init: Vec<String>,

    /// Extra lines of the `begin()` method (`~OPTIONAL_CONFIG~`)
    #[serde(default)]
    pub begin: Option<Vec<String>>,

    #[serde(default)]
    pub serial_interface_args: Option<String>,

    #[serde(default)]
    pub custom_serial_interface_args: Option<String>,

    #[serde(default)]
    pub custom_interface_args: Option<String>,
}

/// Parts of a generated interface method. Missing parts may come from template files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FunctionSpec {
    /// Documentation comment lines
    pub doc: Option<Vec<String>>,
    /// Return type followed by the arguments
    pub decl: Option<Vec<String>>,
    /// Member initializers, turns the function into an inline constructor
    pub init: Option<Vec<String>>,
    /// Body lines
    pub code: Option<Vec<String>>,
}

impl FunctionSpec {
    pub fn is_empty(&self) -> bool {
        self.doc.is_none() && self.decl.is_none() && self.init.is_none() && self.code.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Functions {
    /// Methods added to the interface class besides the standard ones
    #[serde(default)]
    pub interface_list: Vec<String>,

    #[serde(flatten)]
    pub entries: BTreeMap<String, FunctionSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ControllerSpec {
    #[serde(default)]
    pub options: Options,

    #[serde(default)]
    pub interfaces: OrderedMap<InterfaceSpec>,

    /// bits per pixel -> resolution (`WxH`) -> init data
    pub bits: OrderedMap<OrderedMap<ResolutionSpec>>,

    #[serde(default)]
    pub functions: Functions,

    /// Class name -> member declarations (`~FIELDS_DECL~`)
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ControllerSpec {
    pub fn function(&self, name: &str) -> Option<&FunctionSpec> {
        self.functions.entries.get(name).filter(|f| !f.is_empty())
    }

    pub fn i2c_addr(&self) -> &str {
        self.interfaces.get("i2c").map_or("0x3C", |i2c| i2c.addr.as_str())
    }
}

/// A descriptor file and the controllers it defines.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub path: PathBuf,
    pub controllers: OrderedMap<ControllerSpec>,
}

impl Descriptor {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| CodegenError::read_file(path, e))?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let controllers = serde_json::from_str(text).map_err(|e| CodegenError::Descriptor {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            controllers,
        })
    }
}

/// Finds `<templates>/lcd/<dir>/<dir>.json` for every directory with a name longer than 3 characters.
///
/// The result is sorted by directory name.
pub fn discover(templates: &Path) -> Result<Vec<PathBuf>> {
    let lcd = templates.join("lcd");
    let entries = fs::read_dir(&lcd).map_err(|e| CodegenError::read_file(&lcd, e))?;
    let mut result = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.len() <= 3 || !entry.file_type()?.is_dir() {
            continue;
        }
        let json = entry.path().join(format!("{name}.json"));
        if json.is_file() {
            result.push(json);
        } else {
            log::debug!("Skipping '{}', no {name}.json", entry.path().display());
        }
    }
    if result.is_empty() {
        return Err(CodegenError::NoDescriptors { path: lcd });
    }
    result.sort();
    Ok(result)
}
