use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TableAvailability {
    pub exists: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStatusDto {
    pub tables: TableStatusTables,
    pub all_tables_exist: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableStatusTables {
    pub blog_posts: TableAvailability,
    pub writings: TableAvailability,
}
