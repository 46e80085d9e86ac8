use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    descriptor::{discover, ControllerSpec, Descriptor},
    functions::{function_list, FunctionParts},
    CodegenError, Result, TemplateDir, TemplateVars,
};

const INTERFACE_CLASS: &str = "Interface~CONTROLLER~";
const DEFAULT_CUSTOM_INTERFACE_ARGS: &str = "*this, dcPin, frequency = frequency ? frequency : ~FREQUENCY~";

/// Rendered sources of one controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSources {
    /// Lower case controller name
    pub controller: String,
    pub header: String,
    pub inl: String,
    pub cpp: String,
}

impl ControllerSources {
    /// `(file name, content)` of `lcd_<c>.h`, `lcd_<c>.inl` and `lcd_<c>.cpp`.
    pub fn files(&self) -> [(String, &str); 3] {
        [
            (format!("lcd_{}.h", self.controller), self.header.as_str()),
            (format!("lcd_{}.inl", self.controller), self.inl.as_str()),
            (format!("lcd_{}.cpp", self.controller), self.cpp.as_str()),
        ]
    }
}

pub struct Generator {
    templates: TemplateDir,
    output: PathBuf,
}

impl Generator {
    pub fn new(templates: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            templates: TemplateDir::new(templates),
            output: output.into(),
        }
    }

    /// Generates every controller of every descriptor, or only `only` (case insensitive).
    ///
    /// Returns the directories written.
    pub fn generate_all(&self, only: Option<&str>) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for path in discover(self.templates.root())? {
            let descriptor = Descriptor::load(&path)?;
            log::debug!("{}: {} controllers", path.display(), descriptor.controllers.len());
            for (name, spec) in descriptor.controllers.iter() {
                if only.is_some_and(|only| !only.eq_ignore_ascii_case(name)) {
                    continue;
                }
                let sources = self.render(name, spec)?;
                written.push(self.write(&sources)?);
            }
        }
        if let Some(name) = only {
            if written.is_empty() {
                return Err(CodegenError::UnknownController { name: name.to_string() });
            }
        }
        Ok(written)
    }

    /// Recreates `<output>/<controller>` with the rendered files.
    pub fn write(&self, sources: &ControllerSources) -> Result<PathBuf> {
        let dir = self.output.join(&sources.controller);
        if dir.exists() {
            fs::remove_dir_all(&dir).map_err(|e| CodegenError::write_file(&dir, e))?;
        }
        fs::create_dir_all(&dir).map_err(|e| CodegenError::write_file(&dir, e))?;
        for (name, content) in sources.files() {
            let path = dir.join(name);
            fs::write(&path, content).map_err(|e| CodegenError::write_file(&path, e))?;
        }
        log::info!("Generated {}", dir.display());
        Ok(dir)
    }

    pub fn render(&self, name: &str, spec: &ControllerSpec) -> Result<ControllerSources> {
        let controller = name.to_lowercase();
        let mut vars = TemplateVars {
            controller_upper: controller.to_uppercase(),
            controller: controller.clone(),
            config_func: spec.options.config_func.clone(),
            i2c_addr: spec.i2c_addr().to_string(),
            reset_duration: spec.options.reset_duration.to_string(),
            reset_delay: spec.options.reset_delay.to_string(),
            ..Default::default()
        };

        let functions = function_list(spec)
            .iter()
            .map(|function| FunctionParts::resolve(spec, &self.templates, &controller, function))
            .collect::<Result<Vec<_>>>()?;
        let funcs_decl = functions.iter().map(|f| vars.fill(&f.declaration()) + "\n\n").collect();
        vars.funcs_decl = funcs_decl;
        let funcs_def = functions
            .iter()
            .filter_map(|f| f.definition(&spec.options))
            .map(|def| vars.fill(&def) + "\n")
            .collect();
        vars.funcs_def = funcs_def;
        vars.fields_decl = match spec.fields.get(INTERFACE_CLASS) {
            Some(fields) => fields.join("\n"),
            None => self.templates.fields(&controller, INTERFACE_CLASS)?.unwrap_or_default().join("\n"),
        };

        let copyright = self.part("copyright.txt", &vars)?;
        let mut header = copyright.clone() + &self.part("header.h", &vars)?;
        let mut inl = copyright.clone() + &self.part("header.inl", &vars)?;
        let mut cpp = copyright + &self.part("header.cpp", &vars)?;
        header += &self.part("interface_spi.h", &vars)?;

        for (bits, resolutions) in spec.bits.iter() {
            vars.bits = bits.to_string();
            vars.exbits = if spec.options.no_bits_in_name { String::new() } else { format!("x{bits}") };
            header += &self.part("display.h", &vars)?;
            inl += &self.part("display.inl", &vars)?;

            for (resolution, init) in resolutions.iter() {
                let Some((width, height)) = resolution.split_once('x') else {
                    return Err(CodegenError::InvalidResolution {
                        value: resolution.to_string(),
                    });
                };
                vars.resolution = format!("{resolution}{}", vars.exbits);
                vars.width = width.to_string();
                vars.height = height.to_string();
                vars.init = init.init.join("\n");
                vars.optional_config = init.begin.as_ref().map(|lines| lines.join("\n")).unwrap_or_default();
                header += &self.part("resolution.h", &vars)?;
                inl += &self.part("resolution.inl", &vars)?;

                for (interface, interface_spec) in spec.interfaces.iter() {
                    let i2c = interface == "i2c";
                    vars.serial_interface_args = init
                        .serial_interface_args
                        .clone()
                        .unwrap_or_else(|| if i2c { "*this, -1" } else { "*this, config.dc" }.to_string());
                    vars.custom_serial_interface_args = init
                        .custom_serial_interface_args
                        .clone()
                        .unwrap_or_else(|| if i2c { "*this, -1" } else { "*this, dcPin" }.to_string());
                    vars.custom_interface_args = init
                        .custom_interface_args
                        .clone()
                        .unwrap_or_else(|| DEFAULT_CUSTOM_INTERFACE_ARGS.to_string());
                    vars.frequency = interface_spec.frequency.to_string();
                    header += &self.part(&format!("display_{interface}.h"), &vars)?;
                    cpp += &self.part(&format!("display_{interface}.cpp"), &vars)?;
                }
            }
        }
        header += &self.part("footer.h", &vars)?;

        Ok(ControllerSources { controller, header, inl, cpp })
    }

    fn part(&self, template: &str, vars: &TemplateVars) -> Result<String> {
        Ok(vars.fill(&self.templates.read(template)?))
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}
