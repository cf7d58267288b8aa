//! Layout documents
//!
//! A document describes one container and the entities laid out inside it,
//! in TOML:
//!
//! ```toml
//! [container]
//! width = 600
//! height = 200
//!
//! [[entity]]
//! name = "field"
//! width = 80
//! height = 20
//! bindings = [
//!   { edge = "left", distance = 12, direction = "right", of = "left" },
//!   { preset = "below", target = "label" },
//! ]
//! ```
//!
//! Explicit bindings name both edges and the direction; `fixed` selects the
//! entity they are measured from (the container when absent). Preset
//! bindings use the builders of [`BindingFactory`] with the margins and
//! spacing of the `[layout]` table.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use toml::Spanned;

use crate::error::{DocumentError, Span};
use crate::layout::{
    Binding, BindingFactory, ConstraintSet, ContainerChain, Direction, Edge, Entity, LayoutConfig,
    LayoutError, Preset, RelativeLayout, Size, StaticSizes,
};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlDocument {
    #[serde(default)]
    layout: LayoutConfig,
    #[serde(default)]
    container: TomlContainer,
    #[serde(default, rename = "entity")]
    entities: Vec<TomlEntity>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlContainer {
    width: Option<Spanned<f64>>,
    height: Option<Spanned<f64>>,
    #[serde(default)]
    ancestors: Vec<Spanned<String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlEntity {
    name: Spanned<String>,
    width: Option<Spanned<f64>>,
    height: Option<Spanned<f64>>,
    #[serde(default)]
    bindings: Vec<Spanned<TomlBinding>>,
}

/// Either an explicit relation or a preset; which one is decided after
/// parsing so both can carry spans
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlBinding {
    edge: Option<Edge>,
    #[serde(default)]
    distance: f64,
    direction: Option<Direction>,
    of: Option<Edge>,
    fixed: Option<Spanned<String>>,
    preset: Option<Preset>,
    target: Option<Spanned<String>>,
}

/// One entity of a document
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDecl {
    pub entity: Entity,
    pub preferred: Size,
    pub constraints: ConstraintSet,
    pub span: Span,
}

/// A parsed and checked layout document
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDocument {
    pub config: LayoutConfig,
    pub container: Size,
    pub ancestors: Vec<Entity>,
    pub entities: Vec<EntityDecl>,
}

impl LayoutDocument {
    /// Load a document from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a document from TOML text
    ///
    /// Every `fixed`/`target` must name a declared entity, an ancestor of the
    /// container, or `container`.
    pub fn parse(content: &str) -> Result<Self, DocumentError> {
        let parsed: TomlDocument = toml::from_str(content)?;
        let factory = BindingFactory::new(parsed.layout.margins, parsed.layout.spacing);

        let mut known: HashSet<String> = HashSet::new();
        known.insert(Entity::CONTAINER_NAME.to_string());
        for ancestor in &parsed.container.ancestors {
            known.insert(ancestor.get_ref().clone());
        }
        for decl in &parsed.entities {
            if !known.insert(decl.name.get_ref().clone()) {
                return Err(DocumentError::DuplicateEntity {
                    name: decl.name.get_ref().clone(),
                    span: decl.name.span(),
                });
            }
        }

        let mut entities = Vec::with_capacity(parsed.entities.len());
        for decl in &parsed.entities {
            let name = decl.name.get_ref();
            let mut constraints = ConstraintSet::new();
            for binding in &decl.bindings {
                let binding = convert_binding(name, binding, &factory, &known)?;
                constraints.add(&binding);
            }
            let preferred = Size::new(
                finite_size(name, "width", &decl.width)?,
                finite_size(name, "height", &decl.height)?,
            );
            entities.push(EntityDecl {
                entity: Entity::named(name),
                preferred,
                constraints,
                span: decl.name.span(),
            });
        }

        let container = Size::new(
            finite_size(Entity::CONTAINER_NAME, "width", &parsed.container.width)?,
            finite_size(Entity::CONTAINER_NAME, "height", &parsed.container.height)?,
        );

        Ok(Self {
            config: parsed.layout,
            container,
            ancestors: parsed
                .container
                .ancestors
                .iter()
                .map(|a| Entity::named(a.get_ref()))
                .collect(),
            entities,
        })
    }

    /// Sizes declared in the document
    pub fn sizes(&self) -> StaticSizes {
        let mut sizes = StaticSizes::new(self.container);
        for decl in &self.entities {
            sizes.set_preferred(decl.entity.clone(), decl.preferred);
        }
        sizes
    }

    pub fn ancestry(&self) -> ContainerChain {
        ContainerChain::new(self.ancestors.iter().cloned())
    }

    /// Build a layout session holding every entity of the document
    pub fn layout(&self) -> Result<RelativeLayout, LayoutError> {
        let mut layout = RelativeLayout::new(self.config.clone()).with_ancestry(self.ancestry());
        for decl in &self.entities {
            layout.add(decl.entity.clone(), &decl.constraints)?;
        }
        Ok(layout)
    }
}

fn convert_binding(
    entity: &str,
    binding: &Spanned<TomlBinding>,
    factory: &BindingFactory,
    known: &HashSet<String>,
) -> Result<Binding, DocumentError> {
    let span = binding.span();
    let raw = binding.get_ref();

    if let Some(preset) = raw.preset {
        if raw.edge.is_some() || raw.direction.is_some() || raw.of.is_some() || raw.fixed.is_some() {
            return Err(DocumentError::invalid_binding(
                entity,
                "a preset binding cannot also set edge, direction, of or fixed",
                span,
            ));
        }
        let target = raw
            .target
            .as_ref()
            .map(|t| resolve(t, known))
            .transpose()?;
        return factory
            .preset(preset, target)
            .ok_or_else(|| DocumentError::MissingTarget {
                entity: entity.to_string(),
                preset,
                span,
            });
    }

    if raw.target.is_some() {
        return Err(DocumentError::invalid_binding(
            entity,
            "'target' is only used with 'preset'; use 'fixed' for explicit bindings",
            span,
        ));
    }

    let (Some(edge), Some(direction), Some(of)) = (raw.edge, raw.direction, raw.of) else {
        return Err(DocumentError::invalid_binding(
            entity,
            "expected 'edge', 'direction' and 'of', or a 'preset'",
            span,
        ));
    };

    if !raw.distance.is_finite() {
        return Err(DocumentError::invalid_binding(
            entity,
            format!("distance must be a finite number, got {}", raw.distance),
            span,
        ));
    }

    let fixed = raw.fixed.as_ref().map(|f| resolve(f, known)).transpose()?;
    Ok(match fixed {
        Some(fixed) => Binding::new(edge, raw.distance, direction, of, fixed),
        None => Binding::on_container(edge, raw.distance, direction, of),
    })
}

/// A declared size, 0 when absent
fn finite_size(
    entity: &str,
    dimension: &'static str,
    value: &Option<Spanned<f64>>,
) -> Result<f64, DocumentError> {
    match value {
        None => Ok(0.0),
        Some(value) if value.get_ref().is_finite() => Ok(*value.get_ref()),
        Some(value) => Err(DocumentError::InvalidSize {
            entity: entity.to_string(),
            dimension,
            span: value.span(),
        }),
    }
}

fn resolve(name: &Spanned<String>, known: &HashSet<String>) -> Result<Entity, DocumentError> {
    let value = name.get_ref();
    if known.contains(value) {
        Ok(Entity::named(value))
    } else {
        Err(DocumentError::undefined(
            value.clone(),
            name.span(),
            find_similar(known, value, 2),
        ))
    }
}

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    let mut previous: Vec<usize> = (0..=n).collect();
    let mut current = vec![0usize; n + 1];
    for (i, ca) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[n]
}

/// Find similar names within a maximum edit distance, closest first
fn find_similar(known: &HashSet<String>, target: &str, max_distance: usize) -> Vec<String> {
    let mut candidates: Vec<(String, usize)> = known
        .iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then(|| (name.clone(), dist))
        })
        .collect();

    candidates.sort_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.cmp(b)));
    candidates
        .into_iter()
        .map(|(name, _)| name)
        .take(3)
        .collect()
}
