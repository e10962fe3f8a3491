//! Resolves each domain-model field to its target kind and effective filter
//! policy. This is the only place directive defaults are interpreted; every
//! builder downstream consumes the resolved policy and never looks at the raw
//! annotation again.

use domain_model::{
    DomainModel, Field, FieldType, RelationshipMeta, ScalarType, TargetType, TypeName,
};

use crate::Error;

/// The resolved `(byValue, byAggregate)` pair governing what filter surface a
/// field contributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterPolicy {
    pub by_value: bool,
    pub by_aggregate: bool,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        FilterPolicy {
            by_value: true,
            by_aggregate: false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum FieldClass<'m> {
    Scalar {
        scalar_type: ScalarType,
    },
    Relationship {
        target: TargetType<'m>,
        meta: &'m RelationshipMeta,
    },
}

#[derive(Clone, Copy, Debug)]
pub struct ClassifiedField<'m> {
    pub class: FieldClass<'m>,
    pub policy: FilterPolicy,
}

/// Pure classification of one field. The only error case is a relationship
/// field whose declared target type does not exist in the model.
pub fn classify_field<'m>(
    model: &'m DomainModel,
    owner: &TypeName,
    field: &'m Field,
) -> Result<ClassifiedField<'m>, Error> {
    let mut policy = resolve_policy(field);
    match &field.field_type {
        FieldType::Scalar(scalar_type) => Ok(ClassifiedField {
            class: FieldClass::Scalar {
                scalar_type: *scalar_type,
            },
            policy,
        }),
        FieldType::Reference {
            target,
            relationship,
        } => {
            let target_type =
                model
                    .lookup_target(target)
                    .ok_or_else(|| Error::UnknownReferenceTarget {
                        type_name: owner.clone(),
                        field_name: field.name.clone(),
                        target: target.clone(),
                    })?;
            // Aggregation has no defined semantics over a disjoint member
            // set, whatever the annotation says.
            if matches!(target_type, TargetType::Union(_)) {
                policy.by_aggregate = false;
            }
            Ok(ClassifiedField {
                class: FieldClass::Relationship {
                    target: target_type,
                    meta: relationship,
                },
                policy,
            })
        }
    }
}

/// An explicit directive argument overrides the default for that argument
/// only; a bare annotation resolves to the same policy as no annotation.
fn resolve_policy(field: &Field) -> FilterPolicy {
    let mut policy = FilterPolicy::default();
    if let Some(directive) = &field.filterable {
        if let Some(by_value) = directive.by_value {
            policy.by_value = by_value;
        }
        if let Some(by_aggregate) = directive.by_aggregate {
            policy.by_aggregate = by_aggregate;
        }
    }
    policy
}

pub(crate) fn target_type_name<'m>(target: &TargetType<'m>) -> &'m TypeName {
    match target {
        TargetType::Node(node_type) => &node_type.name,
        TargetType::Interface(interface_type) => &interface_type.name,
        TargetType::Union(union_type) => &union_type.name,
    }
}
