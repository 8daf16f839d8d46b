mod api_tests;
mod page_tests;
mod renovation_tests;
