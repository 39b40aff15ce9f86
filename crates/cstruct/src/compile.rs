//! Schema compiler.

use crate::error::CompileError;
use crate::model::Model;
use crate::schema::Schema;

/// Compiles a schema tree into a [`Model`].
///
/// Pure and cheap enough to run once per record, which is how layouts whose
/// dimensions come from previously parsed fields are built.
pub fn compile(schema: &Schema) -> Result<Model, CompileError> {
    match schema {
        Schema::Primitive(p) => {
            p.checked_size().ok_or(CompileError::SizeOverflow)?;
            Ok(Model::Scalar(*p))
        }
        Schema::Array { base, count } => Model::array(compile(base)?, *count),
        Schema::Record(fields) => {
            let fields = fields
                .iter()
                .map(|(name, node)| Ok((name.clone(), compile(node)?)))
                .collect::<Result<Vec<_>, CompileError>>()?;
            let model = Model::record(fields)?;
            tracing::trace!(size = model.size(), "compiled record");
            Ok(model)
        }
        Schema::Literal(v) => Ok(Model::Constant(v.clone())),
        Schema::Compiled(m) => Ok(m.clone()),
    }
}
