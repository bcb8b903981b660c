pub(crate) mod compare_api_version;
