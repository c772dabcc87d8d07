#[derive(Debug)]
pub struct ListOptions {
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug)]
pub struct PaginatedList<T> {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<T>,
}
