use pest_consume::{match_nodes, Error, Parser};

use super::ast::{ConfigValue, TypeExprError};
use crate::runner::ds::types::{EnumType, ServiceType, TraitsType, Type};

type ParseResult<T> = std::result::Result<T, Error<Rule>>;
type Node<'i> = pest_consume::Node<'i, Rule, ()>;

#[derive(Parser)]
#[grammar = "parser/config_grammar.pest"] // relative to src
pub struct ConfigParser;

#[pest_consume::parser]
impl ConfigParser {
    fn EOI(_input: Node) -> ParseResult<()> {
        Ok(())
    }

    fn component_id(input: Node) -> ParseResult<String> {
        Ok(input.as_str().to_string())
    }

    fn reference(input: Node) -> ParseResult<String> {
        Ok(match_nodes!(input.into_children();
            [component_id(id)] => id,
        ))
    }

    fn token(input: Node) -> ParseResult<String> {
        Ok(input.as_str().to_string())
    }

    fn list(input: Node) -> ParseResult<Vec<String>> {
        Ok(match_nodes!(input.into_children();
            [token(tokens)..] => tokens.collect(),
        ))
    }

    fn ident(input: Node) -> ParseResult<String> {
        Ok(input.as_str().to_string())
    }

    fn array_suffix(_input: Node) -> ParseResult<()> {
        Ok(())
    }

    fn handle_type(input: Node) -> ParseResult<Type> {
        Ok(match_nodes!(input.into_children();
            [ident(service), ident(traits)] => {
                Type::Handle(ServiceType::new(service), TraitsType::new(traits))
            },
        ))
    }

    fn untyped_handle(_input: Node) -> ParseResult<Type> {
        Ok(Type::UntypedHandle)
    }

    fn enum_type(input: Node) -> ParseResult<Type> {
        let mut idents = input.into_children();
        let name = match idents.next() {
            Some(node) => Self::ident(node)?,
            None => return Err(input_error(&idents, "enum name expected")),
        };
        let mut enum_type = EnumType::new(name);
        for node in idents {
            enum_type = enum_type.variant(Self::ident(node)?);
        }
        Ok(Type::Enum(enum_type))
    }

    fn service_type(input: Node) -> ParseResult<Type> {
        Ok(match_nodes!(input.into_children();
            [ident(name)] => Type::service(name),
        ))
    }

    fn named_type(input: Node) -> ParseResult<Type> {
        Ok(match_nodes!(input.into_children();
            [ident(name)] => Type::Named(name),
        ))
    }

    fn simple_type(input: Node) -> ParseResult<Type> {
        Ok(match input.as_str() {
            "string" => Type::String,
            "bool" => Type::Bool,
            "char" => Type::Char,
            "i8" => Type::I8,
            "i16" => Type::I16,
            "i32" => Type::I32,
            "i64" => Type::I64,
            "u8" => Type::U8,
            "u16" => Type::U16,
            "u32" => Type::U32,
            "u64" => Type::U64,
            "f32" => Type::F32,
            "f64" => Type::F64,
            "image" => Type::Image,
            "icon" => Type::Icon,
            "file" => Type::File,
            "directory" => Type::Directory,
            other => return Err(input.error(format!("unknown type '{}'", other))),
        })
    }

    fn type_term(input: Node) -> ParseResult<Type> {
        let mut children = input.into_children();
        let base = match children.next() {
            Some(node) => match node.as_rule() {
                Rule::handle_type => Self::handle_type(node)?,
                Rule::untyped_handle => Self::untyped_handle(node)?,
                Rule::enum_type => Self::enum_type(node)?,
                Rule::service_type => Self::service_type(node)?,
                Rule::named_type => Self::named_type(node)?,
                Rule::simple_type => Self::simple_type(node)?,
                _ => return Err(node.error("type expected")),
            },
            None => return Err(input_error(&children, "type expected")),
        };
        // Each `[]` suffix wraps one more array level.
        Ok(children.fold(base, |ty, _| Type::array_of(ty)))
    }

    fn type_expr(input: Node) -> ParseResult<Type> {
        Ok(match_nodes!(input.into_children();
            [type_term(ty), EOI(_)] => ty,
        ))
    }
}

fn input_error(nodes: &pest_consume::Nodes<Rule, ()>, message: &str) -> Error<Rule> {
    nodes.error(message.to_string())
}

impl ConfigParser {
    /// Classify a raw configuration value as a component reference or a
    /// literal.
    pub fn parse_config_value(raw: &str) -> ConfigValue {
        match ConfigParser::parse(Rule::reference, raw).and_then(|nodes| nodes.single()) {
            Ok(node) => match ConfigParser::reference(node) {
                Ok(id) => ConfigValue::Reference(id),
                Err(_) => ConfigValue::Literal(raw.to_string()),
            },
            Err(_) => ConfigValue::Literal(raw.to_string()),
        }
    }

    /// Split an array literal into its `;`-separated tokens. Empty tokens are
    /// kept and nothing is trimmed.
    pub fn split_list(raw: &str) -> ParseResult<Vec<String>> {
        let node = ConfigParser::parse(Rule::list, raw)?.single()?;
        ConfigParser::list(node)
    }

    /// Parse a textual type expression such as `service IRunner[]` or
    /// `enum YesNo { Yes, No }`.
    pub fn parse_type(source: &str) -> Result<Type, TypeExprError> {
        let node = ConfigParser::parse(Rule::type_expr, source)
            .and_then(|nodes| nodes.single())
            .map_err(|e| TypeExprError::new(source, e))?;
        ConfigParser::type_expr(node).map_err(|e| TypeExprError::new(source, e))
    }
}
