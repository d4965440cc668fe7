use std::collections::BTreeMap;

use crate::api::routes::{operation_id, summary, Application};
use crate::schemas::openapi::{
    OpenApiDocument, OpenApiInfo, OpenApiOperation, OpenApiResponse, OpenApiTag, OPENAPI_VERSION,
};

pub(crate) fn document(app: &Application) -> OpenApiDocument {
    let metadata = app.metadata();
    let mut paths: BTreeMap<String, BTreeMap<String, OpenApiOperation>> = BTreeMap::new();

    for (group, entry) in app.entries() {
        let path = group.full_path(entry);
        let operation = OpenApiOperation {
            tags: group.tags.clone(),
            summary: summary(entry.name),
            operation_id: operation_id(entry.name, &path, entry.method),
            responses: BTreeMap::from([("200", OpenApiResponse {
                description: "Successful Response",
            })]),
        };
        let method = entry.method.as_str().to_ascii_lowercase();
        paths.entry(path).or_default().insert(method, operation);
    }

    let mut tags: Vec<OpenApiTag> = Vec::new();
    for name in app.groups().iter().flat_map(|group| group.tags.iter()) {
        if !tags.iter().any(|tag| &tag.name == name) {
            tags.push(OpenApiTag { name: name.clone() });
        }
    }

    OpenApiDocument {
        openapi: OPENAPI_VERSION,
        info: OpenApiInfo {
            title: metadata.title.clone(),
            description: metadata.description.clone(),
            version: metadata.version.clone(),
        },
        paths,
        tags,
    }
}
