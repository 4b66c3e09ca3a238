//! In-memory storefront used by the integration tests.
//!
//! Implements just enough of the server to drive the client end to end:
//! credential check, the store-setup redirect chain that issues the CSRF
//! cookie, authenticated reads, and a cart that add/remove really change.

#![allow(dead_code)]

use async_trait::async_trait;
use clicklist_api::{ClickListClient, ClientConfig};
use clicklist_fetch::header::{COOKIE, HeaderMap, HeaderValue, LOCATION, SET_COOKIE};
use clicklist_fetch::{FetchError, Method, StatusCode, Transport, TransportRequest, TransportResponse};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

pub const EMAIL: &str = "shopper@example.com";
pub const PASSWORD: &str = "correct-horse";
pub const SESSION_ID: &str = "sid-42";
pub const CSRF_TOKEN: &str = "csrf-123";

/// A request as the server saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn cookie(&self, name: &str) -> Option<String> {
        let header = self.header(COOKIE.as_str())?;
        header.split("; ").find_map(|pair| {
            let (n, v) = pair.split_once('=')?;
            (n == name).then(|| v.to_string())
        })
    }
}

/// Mutable server state.
#[derive(Debug)]
pub struct State {
    pub issue_csrf: bool,
    pub fail_cart_with: Option<StatusCode>,
    pub order_id: Option<String>,
    pub cart: Vec<Value>,
    pub favorites: Vec<Value>,
    pub recent: Vec<Value>,
    pub requests: Vec<Recorded>,
}

#[derive(Debug)]
pub struct FakeStorefront {
    state: Mutex<State>,
}

impl FakeStorefront {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State {
                issue_csrf: true,
                fail_cart_with: None,
                order_id: Some("ORD-7".to_string()),
                cart: Vec::new(),
                favorites: vec![
                    json!({
                        "upc": "0001111041700",
                        "currentPrice": "2.50",
                        "currentPriceIsYellowTag": false,
                        "description": "Kroger 2% Milk"
                    }),
                    json!({
                        "upc": "0001111060903",
                        "currentPrice": "1.99",
                        "currentPriceIsYellowTag": true,
                        "description": "Kroger Large Eggs"
                    }),
                ],
                recent: vec![json!({
                    "upc": "0001111008631",
                    "currentPrice": "3.29",
                    "description": "Kroger Bread"
                })],
                requests: Vec::new(),
            }),
        })
    }

    pub fn with_state(self: &Arc<Self>, f: impl FnOnce(&mut State)) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn cart_quantity(&self, upc: &str) -> Option<u64> {
        self.state
            .lock()
            .unwrap()
            .cart
            .iter()
            .find(|item| item["upc"] == upc)
            .and_then(|item| item["quantity"].as_u64())
    }

    fn route(state: &mut State, request: &Recorded) -> TransportResponse {
        let path = request.path.as_str();
        match (request.method.as_str(), path) {
            ("POST", "/user/authenticate") => Self::authenticate(request),
            ("GET", "/onlineshopping/redirect") => {
                redirect("/storecatalog/clicklistbeta/", &["ShoppingContext=pickup; Path=/"])
            }
            ("GET", "/storecatalog/clicklistbeta/") => {
                let cookies: &[&str] = if state.issue_csrf {
                    &["XSRF-TOKEN=csrf-123; Domain=.kroger.com; Path=/"]
                } else {
                    &[]
                };
                respond(StatusCode::OK, "<html>store setup</html>", cookies)
            }
            _ if !authorized(request) => redirect("/signin", &[]),
            ("GET", "/storecatalog/clicklistbeta/api/items/personalized/myFavorites") => {
                json_response(&Value::Array(state.favorites.clone()))
            }
            (
                "GET",
                "/storecatalog/clicklistbeta/api/items/personalized/recentPurchases/quick",
            ) => json_response(&Value::Array(state.recent.clone())),
            ("GET", "/storecatalog/clicklistbeta/api/cart") => {
                if let Some(status) = state.fail_cart_with {
                    return respond(status, "cart unavailable", &[]);
                }
                json_response(&json!({
                    "orderId": state.order_id,
                    "cartItems": state.cart,
                    "subtotal": "0.00"
                }))
            }
            ("POST", "/storecatalog/clicklistbeta/api/cart/item") => {
                Self::cart_item(state, request)
            }
            _ => respond(StatusCode::NOT_FOUND, "not found", &[]),
        }
    }

    fn authenticate(request: &Recorded) -> TransportResponse {
        let account = request.body.as_ref().map(|b| b["account"].clone());
        let accepted = account.as_ref().is_some_and(|a| {
            a["email"] == EMAIL && a["password"] == PASSWORD && a["rememberMe"] == true
        });

        if !accepted {
            return json_response(&json!({
                "hasErrors": true,
                "errors": [{"message": "The email or password entered is incorrect."}]
            }));
        }

        let body = json!({
            "hasErrors": false,
            "userProfile": {
                "emailAddress": EMAIL,
                "firstName": "Pat",
                "lastName": "Shopper"
            },
            "store": {
                "storeInformation": {
                    "storeNumber": "352",
                    "divisionNumber": "014",
                    "recordId": 81,
                    "localName": "Kroger Eastgate",
                    "address": {
                        "addressLineOne": "4530 Eastgate Blvd",
                        "city": "Cincinnati",
                        "state": "OH",
                        "zipCode": "45245"
                    },
                    "phoneNumber": "5135550100"
                }
            }
        });
        let mut response = json_response(&body);
        append_cookie(&mut response, &format!("sid={SESSION_ID}; Path=/; HttpOnly"));
        response
    }

    fn cart_item(state: &mut State, request: &Recorded) -> TransportResponse {
        let Some(body) = request.body.clone() else {
            return respond(StatusCode::BAD_REQUEST, "missing body", &[]);
        };
        let upc = body["upc"].as_str().unwrap_or_default().to_string();

        if request.query.as_deref() == Some("strategy=deleteItem") {
            state.cart.retain(|item| item["upc"] != upc.as_str());
            return json_response(&json!({ "removed": upc }));
        }

        let added = body["quantity"].as_u64().unwrap_or_default();
        if let Some(entry) = state.cart.iter_mut().find(|item| item["upc"] == upc.as_str()) {
            let total = entry["quantity"].as_u64().unwrap_or_default() + added;
            entry["quantity"] = json!(total);
        } else {
            let mut entry = body.clone();
            entry["quantity"] = json!(added);
            state.cart.push(entry);
        }
        json_response(&json!({ "success": true }))
    }
}

#[async_trait]
impl Transport for FakeStorefront {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, FetchError> {
        let body = match &request.body {
            Some(bytes) => Some(serde_json::from_slice(bytes)?),
            None => None,
        };
        let recorded = Recorded {
            method: request.method,
            path: request.url.path().to_string(),
            query: request.url.query().map(String::from),
            headers: request.headers,
            body,
        };

        let mut state = self.state.lock().unwrap();
        let response = Self::route(&mut state, &recorded);
        state.requests.push(recorded);
        Ok(response)
    }
}

fn authorized(request: &Recorded) -> bool {
    request.cookie("sid").as_deref() == Some(SESSION_ID)
        && request.header("x-xsrf-token") == Some(CSRF_TOKEN)
}

fn respond(status: StatusCode, body: &str, cookies: &[&str]) -> TransportResponse {
    let mut response = TransportResponse {
        status,
        headers: HeaderMap::new(),
        body: body.to_string(),
    };
    for cookie in cookies {
        append_cookie(&mut response, cookie);
    }
    response
}

fn json_response(body: &Value) -> TransportResponse {
    respond(StatusCode::OK, &body.to_string(), &[])
}

fn redirect(location: &str, cookies: &[&str]) -> TransportResponse {
    let mut response = respond(StatusCode::FOUND, "", cookies);
    response
        .headers
        .insert(LOCATION, HeaderValue::from_str(location).unwrap());
    response
}

fn append_cookie(response: &mut TransportResponse, cookie: &str) {
    response
        .headers
        .append(SET_COOKIE, HeaderValue::from_str(cookie).unwrap());
}

/// A client wired to `server` with the default configuration.
pub fn client(server: &Arc<FakeStorefront>) -> ClickListClient {
    ClickListClient::with_transport(ClientConfig::default(), server.clone()).unwrap()
}

/// A client that has already logged in against `server`.
pub async fn logged_in_client(server: &Arc<FakeStorefront>) -> ClickListClient {
    let mut client = client(server);
    client.login(EMAIL, PASSWORD).await.unwrap();
    client
}
