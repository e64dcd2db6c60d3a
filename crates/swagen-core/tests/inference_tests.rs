use swagen_core::ir::{ObjectModel, TemplateData};
use swagen_core::spec;
use swagen_core::transform::template_data;
use swagen_core::typemap::TypeMap;

const PETSTORE: &str = include_str!("fixtures/petstore.json");

fn petstore() -> TemplateData {
    let doc = spec::from_json(PETSTORE).unwrap();
    template_data(&doc, "Petstore", "", &TypeMap::swift()).unwrap()
}

fn model<'a>(data: &'a TemplateData, name: &str) -> &'a ObjectModel {
    data.object_models
        .iter()
        .find(|m| m.name == name)
        .unwrap_or_else(|| panic!("should have {name} model"))
}

#[test]
fn models_are_pooled_once() {
    let data = petstore();
    // Pet is reached from /pets, /pets/{petId}, /cats, and /dogs, but the
    // pool holds one copy.
    let pets = data
        .object_models
        .iter()
        .filter(|m| m.name == "Pet")
        .count();
    assert_eq!(pets, 1);
    assert_eq!(data.object_models.len(), 7);
    assert_eq!(data.enum_models.len(), 1);
}

#[test]
fn inheritance_flattens_superclass_properties() {
    let data = petstore();
    let cat = model(&data, "Cat");

    assert_eq!(cat.superclass.as_deref(), Some("Pet"));

    let own: Vec<&str> = cat.properties.iter().map(|p| p.spec_name.as_str()).collect();
    assert_eq!(own, vec!["huntingSkill"]);

    let inherited: Vec<&str> = cat
        .inherited_properties
        .iter()
        .map(|p| p.spec_name.as_str())
        .collect();
    assert_eq!(inherited, vec!["petType", "id", "name", "tag"]);

    // Own properties come first so generated constructors put them first.
    let initializer: Vec<&str> = cat
        .initializer_properties
        .iter()
        .map(|p| p.spec_name.as_str())
        .collect();
    assert_eq!(
        initializer,
        vec!["huntingSkill", "petType", "id", "name", "tag"]
    );

    let id = cat
        .inherited_properties
        .iter()
        .find(|p| p.spec_name == "id")
        .unwrap();
    assert_eq!(id.type_name, "Int64");
    assert_eq!(id.format.as_deref(), Some("int64"));
    assert!(id.is_required);
}

#[test]
fn redeclared_inherited_property_is_suppressed() {
    let data = petstore();
    let derived = model(&data, "Derived");

    // Derived re-declares Base's `x` with different doc text; only `y` is
    // its own.
    let own: Vec<&str> = derived
        .properties
        .iter()
        .map(|p| p.spec_name.as_str())
        .collect();
    assert_eq!(own, vec!["y"]);
    assert_eq!(derived.inherited_properties.len(), 1);
    assert_eq!(derived.inherited_properties[0].spec_name, "x");
}

#[test]
fn discriminator_superclass_collects_subclasses() {
    let data = petstore();
    let pet = model(&data, "Pet");
    assert_eq!(pet.discriminator.as_deref(), Some("petType"));
    let subclasses: Vec<&str> = pet.subclasses.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(subclasses, vec!["Cat", "Dog"]);

    // Base has subclasses in the spec sense but no discriminator, so it gets
    // no back-references.
    let base = model(&data, "Base");
    assert!(base.subclasses.is_empty());
}

#[test]
fn inline_object_properties_become_nested_models() {
    let data = petstore();
    let owner = model(&data, "Owner");

    assert_eq!(owner.nested_models.len(), 1);
    let address = &owner.nested_models[0];
    assert_eq!(address.name, "Address");
    let fields: Vec<&str> = address
        .properties
        .iter()
        .map(|p| p.spec_name.as_str())
        .collect();
    assert_eq!(fields, vec!["street", "city"]);

    let address_prop = owner
        .properties
        .iter()
        .find(|p| p.spec_name == "address")
        .unwrap();
    assert_eq!(address_prop.type_name, "Owner.Address");

    // Nested models stay off the top-level pool.
    assert!(data.object_models.iter().all(|m| m.name != "Address"));
}

#[test]
fn self_referential_model_terminates() {
    let data = petstore();
    let node = model(&data, "Node");
    let next = node
        .properties
        .iter()
        .find(|p| p.spec_name == "next")
        .unwrap();
    assert_eq!(next.type_name, "Node");
    assert_eq!(
        data.object_models.iter().filter(|m| m.name == "Node").count(),
        1
    );
}

#[test]
fn enum_schema_becomes_enum_model() {
    let data = petstore();
    let status = data
        .enum_models
        .iter()
        .find(|m| m.name == "Status")
        .expect("should have Status enum");
    assert_eq!(status.enum_type, "String");
    let names: Vec<&str> = status.values.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["available", "pending", "sold"]);
    // String literals are quoted for direct emission into source.
    assert_eq!(status.values[0].value, "\"available\"");
}

#[test]
fn map_schema_maps_to_dictionary_without_a_model() {
    let data = petstore();
    let get_tags = data.methods.iter().find(|m| m.name == "getTags").unwrap();
    assert_eq!(get_tags.response.type_name, "Dictionary<String, String>");
    assert!(data.object_models.iter().all(|m| m.name != "Tags"));
}

#[test]
fn array_responses_wrap_the_element_type() {
    let data = petstore();
    let list_pets = data.methods.iter().find(|m| m.name == "listPets").unwrap();
    assert_eq!(list_pets.response.type_name, "Array<Pet>");
}
