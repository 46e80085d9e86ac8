use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{CodegenError, Result};

/// Variables substituted into the templates.
///
/// The generator updates them while it walks bits, resolutions and interfaces of a controller,
/// every template sees the values of its position in that walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateVars {
    pub funcs_decl: String,
    pub fields_decl: String,
    pub serial_interface_args: String,
    pub custom_serial_interface_args: String,
    pub custom_interface_args: String,
    /// Upper case controller name, `~CONTROLLER~`
    pub controller_upper: String,
    /// Lower case controller name, `~controller~`
    pub controller: String,
    /// Resolution including the bits suffix, e.g. `128x64x16`
    pub resolution: String,
    /// `x<bits>` or empty
    pub exbits: String,
    pub bits: String,
    pub width: String,
    pub height: String,
    pub init: String,
    pub optional_config: String,
    pub config_func: String,
    pub set_block: String,
    pub end_block: String,
    pub frequency: String,
    pub i2c_addr: String,
    pub funcs_def: String,
    pub reset_duration: String,
    pub reset_delay: String,
}

impl Default for TemplateVars {
    fn default() -> Self {
        Self {
            funcs_decl: String::new(),
            fields_decl: String::new(),
            serial_interface_args: String::new(),
            custom_serial_interface_args: String::new(),
            custom_interface_args: String::new(),
            controller_upper: String::new(),
            controller: String::new(),
            resolution: String::new(),
            exbits: String::new(),
            bits: String::new(),
            width: String::new(),
            height: String::new(),
            init: String::new(),
            optional_config: String::new(),
            config_func: "_configureSpiDisplay".to_string(),
            set_block: String::new(),
            end_block: "    this->stop();".to_string(),
            frequency: "4400000".to_string(),
            i2c_addr: "0x3C".to_string(),
            funcs_def: String::new(),
            reset_duration: "20".to_string(),
            reset_delay: "100".to_string(),
        }
    }
}

impl TemplateVars {
    /// Tags in substitution order. Values may contain tags substituted later in the list
    /// (e.g. `~FREQUENCY~` inside the interface arguments).
    fn substitutions(&self) -> [(&'static str, &str); 22] {
        [
            ("~FUNCS_DECL~", self.funcs_decl.as_str()),
            ("~FIELDS_DECL~", self.fields_decl.as_str()),
            ("~SERIAL_INTERFACE_ARGS~", self.serial_interface_args.as_str()),
            ("~CUSTOM_SERIAL_INTERFACE_ARGS~", self.custom_serial_interface_args.as_str()),
            ("~CUSTOM_INTERFACE_ARGS~", self.custom_interface_args.as_str()),
            ("~CONTROLLER~", self.controller_upper.as_str()),
            ("~controller~", self.controller.as_str()),
            ("~RESOLUTION~", self.resolution.as_str()),
            ("~EXBITS~", self.exbits.as_str()),
            ("~BITS~", self.bits.as_str()),
            ("~WIDTH~", self.width.as_str()),
            ("~HEIGHT~", self.height.as_str()),
            ("~INIT~", self.init.as_str()),
            ("~OPTIONAL_CONFIG~", self.optional_config.as_str()),
            ("~CONFIG_FUNC~", self.config_func.as_str()),
            ("~SET_BLOCK~", self.set_block.as_str()),
            ("~END_BLOCK~", self.end_block.as_str()),
            ("~FREQUENCY~", self.frequency.as_str()),
            ("~I2C_ADDR~", self.i2c_addr.as_str()),
            ("~FUNCS_DEF~", self.funcs_def.as_str()),
            ("~RESET_DURATION~", self.reset_duration.as_str()),
            ("~RESET_DELAY~", self.reset_delay.as_str()),
        ]
    }

    pub fn fill(&self, template: &str) -> String {
        self.substitutions()
            .iter()
            .fold(template.to_string(), |text, (tag, value)| text.replace(tag, value))
    }
}

/// The template directory.
#[derive(Debug, Clone)]
pub struct TemplateDir {
    root: PathBuf,
}

impl TemplateDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads a template, a missing template reads as empty text.
    pub fn read(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        if !path.is_file() {
            log::debug!("Template '{}' not found", path.display());
            return Ok(String::new());
        }
        fs::read_to_string(&path).map_err(|e| CodegenError::read_file(&path, e))
    }

    /// Lines of a function part file, controller specific files take precedence.
    ///
    /// Looks up `lcd/<controller>/functions/<function>/<part>` and `functions/<function>/<part>`.
    pub fn function_part(&self, controller: &str, function: &str, part: &str) -> Result<Option<Vec<String>>> {
        let candidates = [
            self.root.join("lcd").join(controller).join("functions").join(function).join(part),
            self.root.join("functions").join(function).join(part),
        ];
        self.first_lines(&candidates)
    }

    /// Lines of a field declaration file, looked up like [`TemplateDir::function_part`].
    pub fn fields(&self, controller: &str, class: &str) -> Result<Option<Vec<String>>> {
        let candidates = [
            self.root.join("lcd").join(controller).join("fields").join(class),
            self.root.join("fields").join(class),
        ];
        self.first_lines(&candidates)
    }

    fn first_lines(&self, candidates: &[PathBuf]) -> Result<Option<Vec<String>>> {
        let Some(path) = candidates.iter().find(|p| p.is_file()) else {
            return Ok(None);
        };
        let text = fs::read_to_string(path).map_err(|e| CodegenError::read_file(path, e))?;
        Ok(Some(text.lines().map(str::to_string).collect()))
    }
}
