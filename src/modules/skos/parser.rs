//! SKOS record extraction
//!
//! Turns the top-level `ConceptScheme`, `Collection` and `Concept` elements of
//! an RDF/XML document into domain records.

use std::collections::HashSet;
use std::path::Path;

use super::xml::{
    DC_NS, Element, RDF_ABOUT, RDF_RESOURCE, XmlName, parse_document, skos,
};
use crate::domain::{
    Collection, Concept, ConceptScheme, DomainError, InCollection, ParsedDataset,
    SemanticRelation, SemanticRelationType,
};

const DC_IDENTIFIER: XmlName = XmlName::new(DC_NS, "identifier");

pub fn concept_scheme_from_xml(element: &Element) -> ConceptScheme {
    ConceptScheme {
        iri: element.attribute_or_default(RDF_ABOUT),
        notation: element.sub_element_text(skos("notation")),
        scope_note: element.sub_element_text(skos("scopeNote")),
        pref_labels: element.sub_elements_by_lang(skos("prefLabel")),
    }
}

/// Build a concept. Its scheme memberships are the `concept_schemes` whose
/// IRI appears in one of the element's `inScheme` references.
pub fn concept_from_xml(element: &Element, concept_schemes: &[ConceptScheme]) -> Concept {
    Concept {
        iri: element.attribute_or_default(RDF_ABOUT),
        identifier: element.sub_element_text(DC_IDENTIFIER),
        notation: element.sub_element_text(skos("notation")),
        pref_labels: element.sub_elements_by_lang(skos("prefLabel")),
        alt_labels: element.sub_elements_by_lang(skos("altLabel")),
        scope_notes: element.sub_elements_by_lang(skos("scopeNote")),
        scheme_iris: resolve_schemes(element, concept_schemes),
    }
}

pub fn collection_from_xml(element: &Element, concept_schemes: &[ConceptScheme]) -> Collection {
    Collection {
        iri: element.attribute_or_default(RDF_ABOUT),
        notation: element.sub_element_text(skos("notation")),
        pref_labels: element.sub_elements_by_lang(skos("prefLabel")),
        scheme_iris: resolve_schemes(element, concept_schemes),
    }
}

/// One relation per `broader`/`narrower`/`related`/... child of a concept
pub fn semantic_relations_from_xml(element: &Element) -> Vec<SemanticRelation> {
    let source_concept_iri = element.attribute_or_default(RDF_ABOUT);

    SemanticRelationType::ALL
        .into_iter()
        .flat_map(|relation_type| {
            element
                .sub_element_attributes(skos(relation_type.as_str()), RDF_RESOURCE)
                .into_iter()
                .map(move |target_concept_iri| (relation_type, target_concept_iri))
        })
        .map(|(relation_type, target_concept_iri)| SemanticRelation {
            relation_type,
            source_concept_iri: source_concept_iri.clone(),
            target_concept_iri,
        })
        .collect()
}

pub fn in_collection_from_xml(element: &Element) -> Vec<InCollection> {
    let collection_iri = element.attribute_or_default(RDF_ABOUT);

    element
        .sub_element_attributes(skos("member"), RDF_RESOURCE)
        .into_iter()
        .map(|member_iri| InCollection {
            collection_iri: collection_iri.clone(),
            member_iri,
        })
        .collect()
}

/// Parse a complete SKOS document.
///
/// Relations and collection memberships are unique per pair in storage, so
/// repeated pairs keep their first occurrence.
pub fn parse_dataset(xml: &[u8]) -> Result<ParsedDataset, DomainError> {
    let root = parse_document(xml)?;

    let concept_schemes: Vec<ConceptScheme> = root
        .find_all(skos("ConceptScheme"))
        .map(concept_scheme_from_xml)
        .collect();

    let concept_elements: Vec<&Element> = root.find_all(skos("Concept")).collect();
    let collection_elements: Vec<&Element> = root.find_all(skos("Collection")).collect();

    let concepts = concept_elements
        .iter()
        .map(|element| concept_from_xml(element, &concept_schemes))
        .collect();
    let collections = collection_elements
        .iter()
        .map(|element| collection_from_xml(element, &concept_schemes))
        .collect();

    let mut seen_pairs = HashSet::new();
    let mut semantic_relations = Vec::new();
    for relation in concept_elements
        .iter()
        .flat_map(|element| semantic_relations_from_xml(element))
    {
        let pair = (
            relation.source_concept_iri.clone(),
            relation.target_concept_iri.clone(),
        );
        if seen_pairs.insert(pair) {
            semantic_relations.push(relation);
        } else {
            tracing::debug!(
                "Skipping duplicate {} relation {} -> {}",
                relation.relation_type,
                relation.source_concept_iri,
                relation.target_concept_iri
            );
        }
    }

    let mut seen_members = HashSet::new();
    let in_collections = collection_elements
        .iter()
        .flat_map(|element| in_collection_from_xml(element))
        .filter(|membership| seen_members.insert(membership.clone()))
        .collect();

    Ok(ParsedDataset {
        concept_schemes,
        concepts,
        collections,
        semantic_relations,
        in_collections,
    })
}

pub fn parse_dataset_file(path: &Path) -> Result<ParsedDataset, DomainError> {
    let xml = std::fs::read(path)?;
    parse_dataset(&xml)
}

fn resolve_schemes(element: &Element, concept_schemes: &[ConceptScheme]) -> Vec<String> {
    let referenced: HashSet<String> = element
        .sub_element_attributes(skos("inScheme"), RDF_RESOURCE)
        .into_iter()
        .collect();

    concept_schemes
        .iter()
        .filter(|scheme| referenced.contains(&scheme.iri))
        .map(|scheme| scheme.iri.clone())
        .collect()
}
