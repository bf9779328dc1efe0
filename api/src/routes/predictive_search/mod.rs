pub mod predictive_search_route;
