use crate::domain::models::{event::FormSchema, field::FieldDefinition};

/// A catalog field selected by an event's form schema, carrying the event's
/// required flag.
#[derive(Debug, Clone)]
pub struct ActiveField {
    pub definition: FieldDefinition,
    pub required: bool,
}

/// Intersects the catalog with the event's stored schema. Catalog sort order
/// wins; schema keys with no catalog entry are silently dropped so events
/// created against an older catalog keep rendering.
pub fn fields_for_event(catalog: &[FieldDefinition], schema: &FormSchema) -> Vec<ActiveField> {
    catalog
        .iter()
        .filter(|def| schema.contains(&def.field_key))
        .map(|def| ActiveField {
            definition: def.clone(),
            required: schema.is_required(&def.field_key),
        })
        .collect()
}
