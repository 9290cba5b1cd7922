//! Typed view of Ruby's `name = default` parameters.

use text_size::TextRange;

use crate::CstNode;

/// A parameter with a default value in a method, block or lambda parameter list.
///
/// Keyword parameters (`name: value`) are a different node kind and never cast.
#[derive(Debug, Clone, Copy)]
pub struct OptionalParameter<'a> {
    node: CstNode<'a>,
    name: CstNode<'a>,
    value: CstNode<'a>,
}

impl<'a> OptionalParameter<'a> {
    pub const KIND: &'static str = "optional_parameter";

    /// View `node` as an optional parameter if it is one and both parts parsed.
    pub fn cast(node: CstNode<'a>) -> Option<Self> {
        if node.kind() != Self::KIND {
            return None;
        }
        Some(Self {
            node,
            name: node.field("name")?,
            value: node.field("value")?,
        })
    }

    pub fn name(&self) -> CstNode<'a> {
        self.name
    }

    /// The default value expression.
    pub fn value(&self) -> CstNode<'a> {
        self.value
    }

    pub fn range(&self) -> TextRange {
        self.node.range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreeWalker;
    use rblint_ruby_parser::RubyParser;

    fn parameters(source: &str) -> Vec<(String, String)> {
        let mut parser = RubyParser::new().unwrap();
        let result = parser.parse(source).unwrap();
        TreeWalker::new(result.tree.root_node(), source)
            .filter_map(OptionalParameter::cast)
            .map(|p| (p.name().text().to_string(), p.value().text().to_string()))
            .collect()
    }

    #[test]
    fn test_method_parameters() {
        let found = parameters("def f(a, b = 1, c=[2, 3], d: 4); end");
        assert_eq!(
            found,
            [
                ("b".to_string(), "1".to_string()),
                ("c".to_string(), "[2, 3]".to_string()),
            ]
        );
    }

    #[test]
    fn test_block_and_lambda_parameters() {
        let found = parameters("each { |x, y = :none| }\nf = ->(z=nil) {}\n");
        let names: Vec<_> = found.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["y", "z"]);
    }

    #[test]
    fn test_range_spans_name_to_value() {
        let source = "def f(limit = 10); end";
        let mut parser = RubyParser::new().unwrap();
        let result = parser.parse(source).unwrap();
        let param = TreeWalker::new(result.tree.root_node(), source)
            .find_map(OptionalParameter::cast)
            .unwrap();

        assert_eq!(param.range().start(), param.name().range().start());
        assert_eq!(param.range().end(), param.value().range().end());
        assert!(OptionalParameter::cast(CstNode::new(result.tree.root_node(), source)).is_none());
    }
}
