pub mod api {

    /// Fixed number of results requested per page.
    pub const PER_PAGE: u32 = 10;

    pub const DEFAULT_BASE_URL: &str = "https://api.flickr.com/services/rest/";
}

pub mod paging {

    /// Pages are 1-indexed at the API boundary and throughout the crate.
    pub const FIRST_PAGE: u32 = 1;
}
