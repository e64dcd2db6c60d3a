//! Post-inference passes: pool models off methods, split them by kind, and
//! wire subclass back-references.

use crate::ir::{EnumModel, Method, Model, ObjectModel, SubclassRef};
use crate::transform::methods::MethodWithModels;

/// Pool every method's models into one list, dropping duplicates. Two
/// models that differ only in descriptions count as the same; the first
/// occurrence wins.
pub fn move_models_off_methods(methods: Vec<MethodWithModels>) -> (Vec<Method>, Vec<Model>) {
    let mut pooled: Vec<Model> = Vec::new();
    let mut bare = Vec::with_capacity(methods.len());
    for entry in methods {
        for model in entry.models {
            if !pooled.iter().any(|seen| seen.eq_ignoring_description(&model)) {
                pooled.push(model);
            }
        }
        bare.push(entry.method);
    }
    (bare, pooled)
}

/// Partition pooled models by kind, preserving order.
pub fn split_models(models: Vec<Model>) -> (Vec<ObjectModel>, Vec<EnumModel>) {
    let mut objects = Vec::new();
    let mut enums = Vec::new();
    for model in models {
        match model {
            Model::Object(object) => objects.push(object),
            Model::Enum(inner) => enums.push(inner),
        }
    }
    (objects, enums)
}

/// Attach subclass back-references to models that declare a discriminator.
/// Only discriminator-carrying models get them; a plain superclass without
/// one has no polymorphic decoding to drive.
pub fn resolve_subclasses(mut models: Vec<ObjectModel>) -> Vec<ObjectModel> {
    let edges: Vec<(String, SubclassRef)> = models
        .iter()
        .filter_map(|model| {
            model.superclass.as_ref().map(|superclass| {
                (
                    superclass.clone(),
                    SubclassRef {
                        name: model.name.clone(),
                        spec_name: model.spec_name.clone(),
                    },
                )
            })
        })
        .collect();

    for model in &mut models {
        if model.discriminator.is_none() {
            continue;
        }
        model.subclasses = edges
            .iter()
            .filter(|(superclass, _)| *superclass == model.name)
            .map(|(_, subclass)| subclass.clone())
            .collect();
    }
    models
}
