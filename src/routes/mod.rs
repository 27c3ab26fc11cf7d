pub mod req_routes;
