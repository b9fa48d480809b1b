use std::fmt;

use serde_json::Value;

use crate::error::RequestError;

/// Path parameters that select their own rate-limit bucket.
const MAJOR_PARAMETERS: [&str; 3] = ["channel_id", "guild_id", "webhook_id"];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An endpoint of the pull API: a method and a path template whose `{name}`
/// placeholders are substituted in order by [`compile`](Self::compile).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Route {
    method: Method,
    template: &'static str,
}

impl Route {
    pub const fn new(method: Method, template: &'static str) -> Self {
        Self { method, template }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Names of the template's placeholders, in order.
    pub fn parameters(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.template;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            names.push(&rest[start + 1..start + len]);
            rest = &rest[start + len + 1..];
        }
        names
    }

    /// Substitutes `params` into the template. The rate-limit bucket keeps
    /// only major parameters substituted, so e.g. every message of a channel
    /// shares one bucket.
    pub fn compile(&self, params: &[&str]) -> Result<CompiledRoute, RequestError> {
        let names = self.parameters();
        if names.len() != params.len() {
            return Err(RequestError::invalid_argument(format!(
                "{} {} takes {} parameter(s), {} given",
                self.method,
                self.template,
                names.len(),
                params.len()
            )));
        }
        if let Some(index) = params.iter().position(|param| param.is_empty()) {
            return Err(RequestError::invalid_argument(format!(
                "parameter `{}` of {} may not be empty",
                names[index], self.template
            )));
        }

        let mut path = self.template.to_string();
        let mut bucket = self.template.to_string();
        for (name, value) in names.iter().zip(params) {
            let placeholder = format!("{{{}}}", name);
            path = path.replacen(&placeholder, value, 1);
            if MAJOR_PARAMETERS.contains(name) {
                bucket = bucket.replacen(&placeholder, value, 1);
            }
        }
        // the query string never selects a bucket
        if let Some(query) = bucket.find('?') {
            bucket.truncate(query);
        }

        Ok(CompiledRoute {
            route: *self,
            path,
            bucket: format!("{}/{}", self.method, bucket),
        })
    }
}

/// A route with every placeholder filled in.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompiledRoute {
    route: Route,
    path: String,
    bucket: String,
}

impl CompiledRoute {
    pub fn route(&self) -> Route {
        self.route
    }

    pub fn method(&self) -> Method {
        self.route.method
    }

    /// Relative path including any query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Key the transport's rate limiter groups this request under.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// What is handed to the transport: a compiled route and an optional JSON
/// body.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledRequest {
    pub route: CompiledRoute,
    pub body: Option<Value>,
}

impl CompiledRequest {
    pub fn new(route: CompiledRoute) -> Self {
        Self { route, body: None }
    }

    pub fn with_body(route: CompiledRoute, body: Value) -> Self {
        Self {
            route,
            body: Some(body),
        }
    }
}

impl fmt::Display for CompiledRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.route.method(), self.route.path())
    }
}
