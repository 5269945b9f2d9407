//! The top-level `(kicad_sch ...)` document.

use std::fs;
use std::path::Path;

use adapterama_sexpr::kicad::kv;
use adapterama_sexpr::Sexpr;
use adapterama_symbol::{SymbolDefinition, SymbolLibrary};

use crate::component::{ComponentInstance, TextLabel};
use crate::config::ProjectConfig;
use crate::error::{Result, SchematicError};
use crate::units::new_uuid;

const SCHEMATIC_VERSION: &str = "20250114";
const GENERATOR: &str = "adapterama";

#[derive(Debug, Clone, PartialEq)]
pub struct TitleBlock {
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub revision: String,
    pub comments: Vec<String>,
}

impl TitleBlock {
    /// Title block for `project`, dated today.
    pub fn from_project(project: &ProjectConfig) -> Self {
        Self {
            title: project.title.clone(),
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            revision: project.revision.clone(),
            comments: project.comments.clone(),
        }
    }

    pub fn to_sexpr(&self) -> Sexpr {
        let comments = self.comments.iter().enumerate().map(|(index, text)| {
            Sexpr::node("comment")
                .with(Sexpr::number((index + 1) as f64))
                .with(Sexpr::string(text.as_str()))
        });

        Sexpr::node("title_block")
            .with(kv("title", Sexpr::string(self.title.as_str())))
            .with(kv("date", Sexpr::string(self.date.as_str())))
            .with(kv("rev", Sexpr::string(self.revision.as_str())))
            .with_all(comments)
    }
}

/// A single-sheet schematic.
///
/// Placed items are rendered when added, so each keeps the UUID it was
/// given then.
#[derive(Debug, Clone, PartialEq)]
pub struct SchematicDocument {
    pub uuid: String,
    pub project: String,
    pub paper: String,
    pub title_block: TitleBlock,
    lib_symbols: Vec<Sexpr>,
    items: Vec<Sexpr>,
}

impl SchematicDocument {
    pub fn new(project: &ProjectConfig) -> Self {
        Self {
            uuid: new_uuid(),
            project: project.name.clone(),
            paper: project.paper.clone(),
            title_block: TitleBlock::from_project(project),
            lib_symbols: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Embed a symbol definition in `lib_symbols`.
    pub fn add_symbol(&mut self, definition: &SymbolDefinition) {
        log::debug!("Embedding symbol '{}'", definition.name());
        self.lib_symbols.push(definition.to_sexpr());
    }

    pub fn add_component(&mut self, component: &ComponentInstance) {
        self.items.push(component.to_sexpr(&self.project));
    }

    pub fn add_label(&mut self, label: &TextLabel) {
        self.items.push(label.to_sexpr());
    }

    pub fn lib_symbols(&self) -> &[Sexpr] {
        &self.lib_symbols
    }

    /// Placed components and labels, in insertion order.
    pub fn items(&self) -> &[Sexpr] {
        &self.items
    }

    pub fn to_sexpr(&self) -> Sexpr {
        Sexpr::node("kicad_sch")
            .with(kv("version", Sexpr::symbol(SCHEMATIC_VERSION)))
            .with(kv("generator", Sexpr::string(GENERATOR)))
            .with(kv(
                "generator_version",
                Sexpr::string(env!("CARGO_PKG_VERSION")),
            ))
            .with(kv("uuid", Sexpr::symbol(self.uuid.as_str())))
            .with(kv("paper", Sexpr::string(self.paper.as_str())))
            .with(self.title_block.to_sexpr())
            .with(Sexpr::node("lib_symbols").with_all(self.lib_symbols.iter().cloned()))
            .with_all(self.items.iter().cloned())
            .with(
                Sexpr::node("sheet_instances").with(
                    Sexpr::node("path")
                        .with(Sexpr::string("/"))
                        .with(kv("page", Sexpr::string("1"))),
                ),
            )
            .with(kv("embedded_fonts", Sexpr::yes_no(false)))
    }

    /// The file text, newline terminated.
    pub fn render(&self) -> String {
        format!("{}\n", self.to_sexpr())
    }
}

/// Write rendered file text to `path`, creating missing parent directories.
pub fn write_schematic_file(content: &str, path: &Path) -> Result<()> {
    let write_error = |source| SchematicError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    log::debug!("Writing {} bytes to {}", content.len(), path.display());
    fs::write(path, content).map_err(write_error)
}

/// Read and parse an existing `.kicad_sym` file.
pub fn read_symbol_library(path: &Path) -> Result<SymbolLibrary> {
    log::debug!("Reading symbol library {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| SchematicError::LibraryRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SymbolLibrary::parse(&content)?)
}
