use super::*;

/// Deletes generated types that carry no information: input objects whose
/// remaining fields all refer back to the type itself (logical combinators),
/// and enums with no values. Deleting a type also deletes every input field
/// and every field argument that referenced it, which may in turn empty other
/// types, so the pass runs to a fixed point. Output objects, interfaces,
/// unions and scalars are never deleted.
pub fn prune_empty_types<S: SchemaContext>(schema: &mut Schema<S>) {
    loop {
        let dead: BTreeSet<ast::TypeName> = schema
            .types
            .iter()
            .filter_map(|(type_name, type_info)| match type_info {
                TypeInfo::InputObject(input_object) => {
                    let substantive_fields = input_object
                        .fields
                        .values()
                        .filter(|field| field.field_type.underlying_type() != type_name)
                        .count();
                    (substantive_fields == 0).then(|| type_name.clone())
                }
                TypeInfo::Enum(enum_type) => {
                    enum_type.values.is_empty().then(|| type_name.clone())
                }
                TypeInfo::Scalar(_)
                | TypeInfo::Object(_)
                | TypeInfo::Interface(_)
                | TypeInfo::Union(_) => None,
            })
            .collect();

        if dead.is_empty() {
            return;
        }

        schema.types.retain(|type_name, _| !dead.contains(type_name));

        for type_info in schema.types.values_mut() {
            match type_info {
                TypeInfo::InputObject(input_object) => {
                    input_object
                        .fields
                        .retain(|_, field| !dead.contains(field.field_type.underlying_type()));
                }
                TypeInfo::Object(object) => drop_dangling_arguments(&mut object.fields, &dead),
                TypeInfo::Interface(interface) => {
                    drop_dangling_arguments(&mut interface.fields, &dead);
                }
                TypeInfo::Scalar(_) | TypeInfo::Enum(_) | TypeInfo::Union(_) => {}
            }
        }
    }
}

fn drop_dangling_arguments<S: SchemaContext>(
    fields: &mut BTreeMap<ast::Name, Field<S>>,
    dead: &BTreeSet<ast::TypeName>,
) {
    for field in fields.values_mut() {
        field
            .arguments
            .retain(|_, argument| !dead.contains(argument.field_type.underlying_type()));
    }
}
