//! Declarations and definitions of the generated interface class methods.

use crate::{
    descriptor::{ControllerSpec, Options},
    Result, TemplateDir,
};

/// Methods every interface class gets, in declaration order.
pub const STANDARD_FUNCTIONS: [&str; 6] = ["Interface~CONTROLLER~", "startBlock", "nextBlock", "endBlock", "setDataMode", "commandStart"];

const DEFAULT_DOC: [&str; 3] = ["    /**", "     * DOCUMENT", "     */"];

/// Resolved parts of one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionParts {
    pub name: String,
    pub doc: Vec<String>,
    pub decl: Vec<String>,
    pub init: Option<Vec<String>>,
    pub code: Vec<String>,
}

impl FunctionParts {
    /// Takes the parts from the descriptor. Functions the descriptor does not describe are
    /// read from the part files of the template directory.
    pub fn resolve(spec: &ControllerSpec, templates: &TemplateDir, controller: &str, name: &str) -> Result<Self> {
        let (doc, decl, init, code) = if let Some(function) = spec.function(name) {
            (function.doc.clone(), function.decl.clone(), function.init.clone(), function.code.clone())
        } else {
            (
                templates.function_part(controller, name, "doc")?,
                templates.function_part(controller, name, "decl")?,
                templates.function_part(controller, name, "init")?,
                templates.function_part(controller, name, "code")?,
            )
        };
        Ok(Self {
            name: name.to_string(),
            doc: doc.unwrap_or_else(|| DEFAULT_DOC.iter().map(ToString::to_string).collect()),
            decl: decl.unwrap_or_else(|| vec!["void".to_string(), String::new()]),
            init,
            code: code.unwrap_or_default(),
        })
    }

    fn return_type(&self) -> &str {
        self.decl.first().map_or("void", String::as_str)
    }

    fn arguments(&self) -> String {
        self.decl.iter().skip(1).map(String::as_str).collect::<Vec<_>>().join(", ")
    }

    /// Declaration inside the class body. Functions with initializers become inline constructors.
    pub fn declaration(&self) -> String {
        let mut lines = self.doc.clone();
        match &self.init {
            Some(init) if !init.is_empty() => {
                lines.push(format!("    {}", self.return_type()));
                lines.push(format!("    {}({})", self.name, self.arguments()));
                lines.push(format!("        : {}", init[0]));
                lines.extend(init[1..].iter().map(|i| format!("        , {i}")));
                lines.push("    {".to_string());
                lines.push("    }".to_string());
            }
            _ => lines.push(format!("    {} {}({});", self.return_type(), self.name, self.arguments())),
        }
        lines.join("\n")
    }

    /// Out of line template definition, `None` for constructors.
    pub fn definition(&self, options: &Options) -> Option<String> {
        if self.init.is_some() {
            return None;
        }
        let mut lines = vec![
            format!(
                "template <class I> {} Interface~CONTROLLER~<I>::{}({})",
                self.return_type(),
                self.name,
                self.arguments()
            ),
            "{".to_string(),
        ];
        if self.code.is_empty() && self.name == "startBlock" {
            lines.push(set_block_body(options));
        } else {
            lines.push(self.code.join("\n"));
        }
        lines.push("}".to_string());
        lines.push(String::new());
        Some(lines.join("\n"))
    }
}

/// Standard methods followed by the descriptor's `interface_list`, without duplicates.
pub fn function_list(spec: &ControllerSpec) -> Vec<String> {
    let mut list: Vec<String> = STANDARD_FUNCTIONS.iter().map(ToString::to_string).collect();
    for name in &spec.functions.interface_list {
        if !list.contains(name) {
            list.push(name.clone());
        }
    }
    list
}

/// Body of `startBlock()` for controllers addressed by column / row commands.
pub fn set_block_body(options: &Options) -> String {
    let wide_args = options.rowcol_bits != 8;
    let mut lines = vec![
        "    lcduint_t rx = w ? (x + w - 1) : (m_base.width() - 1);".to_string(),
        "    commandStart();".to_string(),
        format!("    this->send({});", options.col_cmd),
    ];
    if !options.args_in_cmd_mode {
        lines.push("    setDataMode(1); // According to datasheet all args must be passed in data mode".to_string());
    }
    if wide_args {
        lines.push("    this->send(0);".to_string());
    }
    if options.column_div > 1 {
        lines.push(format!("    this->send(x / {});", options.column_div));
    } else {
        lines.push("    this->send(x);".to_string());
    }
    if wide_args {
        lines.push("    this->send(0);".to_string());
    }
    if options.column_div > 1 {
        lines.push(format!(
            "    this->send( (rx < m_base.width() ? rx : (m_base.width() - 1)) / {} );",
            options.column_div
        ));
    } else {
        lines.push("    this->send( rx < m_base.width() ? rx : (m_base.width() - 1) );".to_string());
    }
    if !options.args_in_cmd_mode {
        lines.push("    setDataMode(0);".to_string());
    }
    lines.push(format!("    this->send({});", options.row_cmd));
    if !options.args_in_cmd_mode {
        lines.push("    setDataMode(1); // According to datasheet all args must be passed in data mode".to_string());
    }
    if wide_args {
        lines.push("    this->send(0);".to_string());
    }
    lines.push("    this->send(y);".to_string());
    if wide_args {
        lines.push("    this->send(0);".to_string());
    }
    lines.push("    this->send(m_base.height() - 1);".to_string());
    if !options.args_in_cmd_mode {
        lines.push("    setDataMode(0);".to_string());
    }
    if let Some(command) = &options.exit_cmd_mode_command {
        lines.push(format!("    this->send({command});"));
    }
    lines.extend(
        [
            "    if ( m_dc >= 0 )",
            "    {",
            "        setDataMode(1);",
            "    }",
            "    else",
            "    {",
            "        this->stop();",
            "        this->start();",
            "        this->send(0x40);",
            "    }",
        ]
        .iter()
        .map(ToString::to_string),
    );
    lines.join("\n")
}
