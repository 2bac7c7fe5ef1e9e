use crate::feature::{
    Feature, Jsdoc, JsdocTag, Method, MixinReference, Param, Privacy, Property, Return,
    SourceRange, ELEMENT_MIXIN,
};

pub(crate) fn mixin(name: &str) -> Feature {
    Feature {
        name: name.to_string(),
        kinds: [ELEMENT_MIXIN.to_string()].into_iter().collect(),
        source_range: Some(SourceRange {
            file: Some("lib/mixins/mixin.js".to_string()),
        }),
        ..Default::default()
    }
}

pub(crate) fn feature(name: &str, kind: &str) -> Feature {
    Feature {
        kinds: [kind.to_string()].into_iter().collect(),
        ..mixin(name)
    }
}

pub(crate) fn in_file(mut feature: Feature, file: &str) -> Feature {
    feature.source_range = Some(SourceRange {
        file: Some(file.to_string()),
    });
    feature
}

pub(crate) fn with_parents(mut feature: Feature, parents: &[&str]) -> Feature {
    feature.mixins = parents
        .iter()
        .map(|p| MixinReference {
            identifier: p.to_string(),
        })
        .collect();
    feature
}

pub(crate) fn property(name: &str, type_: Option<&str>) -> Property {
    Property {
        name: name.to_string(),
        type_: type_.map(str::to_string),
        ..Default::default()
    }
}

pub(crate) fn method(name: &str, params: &[(&str, Option<&str>)]) -> Method {
    Method {
        name: name.to_string(),
        params: params
            .iter()
            .map(|(name, type_)| Param {
                name: name.to_string(),
                type_: type_.map(str::to_string),
                description: None,
            })
            .collect(),
        ..Default::default()
    }
}

pub(crate) fn returning(mut method: Method, type_: &str) -> Method {
    method.return_ = Some(Return {
        type_: Some(type_.to_string()),
    });
    method
}

pub(crate) fn tagged(mut method: Method, titles: &[&str]) -> Method {
    method.jsdoc = Some(Jsdoc {
        tags: titles
            .iter()
            .map(|t| JsdocTag {
                title: t.to_string(),
            })
            .collect(),
    });
    method
}

pub(crate) fn private_method(name: &str) -> Method {
    Method {
        privacy: Privacy::Private,
        ..method(name, &[])
    }
}

pub(crate) fn inherited_method(name: &str, from: &str) -> Method {
    Method {
        inherited_from: Some(from.to_string()),
        ..method(name, &[])
    }
}
