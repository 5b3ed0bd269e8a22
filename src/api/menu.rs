use serde::Serialize;

/// A navigation entry rendered by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MenuItem {
    pub url: &'static str,
    pub id: &'static str,
    pub label: &'static str,
}

/// Menu list response body.
#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub items: &'static [MenuItem],
}

/// Public site navigation.
pub const SITE_MENU: &[MenuItem] = &[
    MenuItem { url: "/", id: "menu-home", label: "Home" },
    MenuItem { url: "/real-life/", id: "menu-life", label: "Real life" },
    MenuItem { url: "/legacy/", id: "menu-legacy", label: "Legacy" },
    MenuItem { url: "http://github.com/marinho", id: "menu-github", label: "Github" },
    MenuItem { url: "http://old.marinhobrandao.com/", id: "menu-old", label: "Old site" },
    MenuItem { url: "http://de.linkedin.com/in/marinhobrandao", id: "menu-linkedin", label: "Linkedin" },
];

/// Administration area navigation.
pub const ADMIN_MENU: &[MenuItem] = &[
    MenuItem { url: "/admin/", id: "admin-home", label: "Home" },
    MenuItem { url: "/admin/pages/", id: "admin-pages", label: "Pages" },
    MenuItem { url: "/admin/blog-posts/", id: "admin-blog-posts", label: "Blog Posts" },
    MenuItem { url: "/logout/", id: "admin-logout", label: "Logout" },
];

/// `GET /api/menu/item/`
pub async fn site_menu_handler() -> axum::Json<MenuResponse> {
    axum::Json(MenuResponse { items: SITE_MENU })
}

/// `GET /api/admin/menu/`
pub async fn admin_menu_handler() -> axum::Json<MenuResponse> {
    axum::Json(MenuResponse { items: ADMIN_MENU })
}
