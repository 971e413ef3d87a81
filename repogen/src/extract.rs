//! Structure extraction from existing Rust source
//!
//! Used when the input of a generation stage is source text rather than an
//! in-process [`EntityDescriptor`](crate::EntityDescriptor): a DTO file that
//! was generated earlier, or one written by hand.

use quote::ToTokens;
use syn::spanned::Spanned;
use syn::{Fields, Ident, Item, ItemStruct, Stmt, Type, Visibility};

use crate::case::unescape_field_name;
use crate::{FieldDescriptor, GenError, Result};

/// Name and exported fields of the first struct in a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedStructure {
    /// Struct name with any `DTO`/`Dto` marker removed
    pub entity_name: String,

    /// `pub` fields in declaration order
    pub fields: Vec<FieldDescriptor>,
}

/// Parse `source` and extract its first type declaration
///
/// Declarations nested in inline modules and function bodies are found too.
/// A first declaration that is not a struct (an enum, alias or trait) has no
/// fields to extract and yields [`GenError::NoFields`].
pub fn extract_structure(source: &str) -> Result<ExtractedStructure> {
    if source.trim().is_empty() {
        return Err(GenError::EmptySource);
    }

    let file = syn::parse_file(source)?;

    let declaration = first_type_declaration(&file.items).ok_or(GenError::NoStructure)?;
    let ident = declaration.ident();

    let entity_name = strip_dto_marker(&ident.to_string());
    if entity_name.is_empty() {
        return Err(GenError::NoStructure);
    }

    let fields = match declaration {
        Declaration::Struct(item) => exported_fields(&item.fields, &entity_name),
        Declaration::Other(_) => Vec::new(),
    };

    log::debug!(
        "Extracted '{}' as '{}' with {} exported field(s)",
        ident,
        entity_name,
        fields.len()
    );

    if fields.is_empty() {
        return Err(GenError::NoFields {
            entity: entity_name,
        });
    }

    Ok(ExtractedStructure {
        entity_name,
        fields,
    })
}

enum Declaration<'a> {
    Struct(&'a ItemStruct),
    Other(&'a Ident),
}

impl<'a> Declaration<'a> {
    fn ident(&self) -> &'a Ident {
        match *self {
            Declaration::Struct(item) => &item.ident,
            Declaration::Other(ident) => ident,
        }
    }
}

/// Depth-first search in source order
fn first_type_declaration(items: &[Item]) -> Option<Declaration<'_>> {
    items.iter().find_map(|item| match item {
        Item::Struct(item) => Some(Declaration::Struct(item)),
        Item::Enum(item) => Some(Declaration::Other(&item.ident)),
        Item::Union(item) => Some(Declaration::Other(&item.ident)),
        Item::Type(item) => Some(Declaration::Other(&item.ident)),
        Item::Trait(item) => Some(Declaration::Other(&item.ident)),
        Item::Mod(item) => item
            .content
            .as_ref()
            .and_then(|(_, items)| first_type_declaration(items)),
        Item::Fn(item) => item.block.stmts.iter().find_map(|stmt| match stmt {
            Stmt::Item(item) => first_type_declaration(std::slice::from_ref(item)),
            _ => None,
        }),
        _ => None,
    })
}

/// Remove every `DTO` and `Dto` occurrence from a struct name
pub fn strip_dto_marker(name: &str) -> String {
    name.replace("DTO", "").replace("Dto", "")
}

fn exported_fields(fields: &Fields, entity_name: &str) -> Vec<FieldDescriptor> {
    let Fields::Named(named) = fields else {
        return Vec::new();
    };

    named
        .named
        .iter()
        .filter(|field| matches!(field.vis, Visibility::Public(_)))
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            Some(
                FieldDescriptor::new(unescape_field_name(&ident.to_string()), type_source(&field.ty))
                    .owned_by(entity_name),
            )
        })
        .collect()
}

/// Source text of a type expression, as written
fn type_source(ty: &Type) -> String {
    ty.span()
        .source_text()
        .unwrap_or_else(|| compact_tokens(&ty.to_token_stream().to_string()))
}

/// Undo the token printer's spacing: `Option < Vec < u8 > >` to `Option<Vec<u8>>`
fn compact_tokens(tokens: &str) -> String {
    let mut out = String::with_capacity(tokens.len());
    for part in tokens.split_whitespace() {
        let glue = matches!(part, "<" | ">" | "::" | "," | ">>")
            || out.ends_with('<')
            || out.ends_with("::")
            || out.ends_with('&')
            || out.ends_with(' ');
        if !out.is_empty() && !glue {
            out.push(' ');
        }
        out.push_str(part);
        if part == "," {
            out.push(' ');
        }
    }
    out
}
