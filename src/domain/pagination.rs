use serde::Deserialize;

#[derive(Debug, Clone, Copy)]
pub struct Page(i32);

impl Page {
    pub fn parse(value: i32) -> Result<Self, String> {
        if value <= 0 {
            return Err("page must be greater than zero".to_string());
        }

        if value > 1_000_000 {
            return Err("page must be a maximum of 1 million".to_string());
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Limit(i32);

impl Limit {
    pub fn parse(value: i32) -> Result<Self, String> {
        if value <= 0 {
            return Err("limit must be greater than zero".to_string());
        }

        if value > 100 {
            return Err("limit must be a maximum of 100".to_string());
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

#[derive(Debug)]
pub struct Pagination {
    pub page: Page,
    pub limit: Limit,
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        (self.page.value() as i64 - 1) * self.limit.value() as i64
    }

    /// Number of pages needed to show `total_records`; zero when there is nothing to show.
    pub fn total_pages(&self, total_records: i64) -> i64 {
        let limit = self.limit.value() as i64;
        (total_records + limit - 1) / limit
    }
}

impl TryFrom<PaginationQuery> for Pagination {
    type Error = String;

    fn try_from(query: PaginationQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            page: Page::parse(query.page)?,
            limit: Limit::parse(query.limit)?,
        })
    }
}

#[derive(Deserialize, Debug)]
pub struct PaginationQuery {
    #[serde(default = "default_page")]
    pub page: i32,
    #[serde(default = "default_limit")]
    pub limit: i32,
}

fn default_page() -> i32 {
    1
}

fn default_limit() -> i32 {
    10
}
