//! OpenAPI description of the routes built by [`crate::routes::crud_router`].

use utoipa::openapi::path::{
    HttpMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn, PathItemBuilder,
};
use utoipa::openapi::{
    ComponentsBuilder, InfoBuilder, OpenApi, OpenApiBuilder, PathsBuilder, Required, Response,
    ResponseBuilder,
};

use crate::entity::CrudEntity;
use crate::response::{ErrorDetail, Status};

fn response(description: &str) -> Response {
    ResponseBuilder::new().description(description).build()
}

fn id_parameter(resource: &str) -> ParameterBuilder {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some(format!("Key of the {resource}")))
}

fn operation(
    id: String,
    summary: String,
    tag: &str,
    with_id: bool,
    resource: &str,
    responses: &[(&str, &str)],
) -> Operation {
    let mut builder = OperationBuilder::new()
        .operation_id(Some(id))
        .summary(Some(summary))
        .tag(tag);
    if with_id {
        builder = builder.parameter(id_parameter(resource));
    }
    for (code, description) in responses {
        builder = builder.response(*code, response(description));
    }
    builder.build()
}

/// Document describing the CRUD routes of `E` mounted at `base_path`.
///
/// ```rust,ignore
/// let doc = crud_openapi::<Todo>("/api/v1/todos");
/// ```
#[must_use]
pub fn crud_openapi<E: CrudEntity>(base_path: &str) -> OpenApi {
    let one = E::RESOURCE_NAME_SINGULAR;
    let many = E::RESOURCE_NAME_PLURAL;
    let tag = many;
    let base = base_path.trim_end_matches('/');
    let collection_path = if base.is_empty() { "/".to_string() } else { base.to_string() };
    let item_path = format!("{base}/{{id}}");

    let collection = PathItemBuilder::new()
        .operation(
            HttpMethod::Get,
            operation(
                format!("get_all_{many}"),
                format!("List every {one}"),
                tag,
                false,
                one,
                &[("200", "Envelope with every stored entity, possibly empty")],
            ),
        )
        .operation(
            HttpMethod::Post,
            operation(
                format!("create_one_{one}"),
                format!("Create a {one}"),
                tag,
                false,
                one,
                &[
                    ("201", "Envelope with the created entity and its key"),
                    ("403", "An equal entity already exists"),
                    ("405", "Create is disabled for this resource"),
                ],
            ),
        )
        .build();

    let item = PathItemBuilder::new()
        .operation(
            HttpMethod::Get,
            operation(
                format!("get_one_{one}"),
                format!("Get one {one} by key"),
                tag,
                true,
                one,
                &[
                    ("200", "Envelope with the requested entity"),
                    ("404", "No entity stored under this key"),
                ],
            ),
        )
        .operation(
            HttpMethod::Put,
            operation(
                format!("update_one_{one}"),
                format!("Replace a {one}, keeping its key"),
                tag,
                true,
                one,
                &[
                    ("200", "Envelope with the updated entity"),
                    ("404", "No entity stored under this key"),
                    ("405", "Update is disabled for this resource"),
                ],
            ),
        )
        .operation(
            HttpMethod::Delete,
            operation(
                format!("delete_one_{one}"),
                format!("Delete a {one}"),
                tag,
                true,
                one,
                &[
                    ("204", "Entity deleted"),
                    ("403", "Deletion refused"),
                    ("404", "No entity stored under this key"),
                    ("405", "Delete is disabled for this resource"),
                ],
            ),
        )
        .build();

    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title(many)
                .version(env!("CARGO_PKG_VERSION"))
                .description(Some(E::RESOURCE_DESCRIPTION))
                .build(),
        )
        .paths(
            PathsBuilder::new()
                .path(collection_path, collection)
                .path(item_path, item)
                .build(),
        )
        .components(Some(
            ComponentsBuilder::new()
                .schema_from::<ErrorDetail>()
                .schema_from::<Status>()
                .build(),
        ))
        .build()
}
