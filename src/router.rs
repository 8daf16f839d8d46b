use crate::context::AppContext;
use crate::data::{ModelHouse, Pid};
use crate::domain::estimate::{estimate, PriceEstimate};
use crate::domain::geo::project;
use crate::domain::renovation::Renovation;
use crate::domain::sectors::Sector;
use crate::domain::stats::{facets, overlay_series, sector_composition, FeaturePick, OverlayChoice};
use crate::errors::ServerError;
use crate::responses::{css_response, html_response, json_response, ResultResp};
use crate::spreadsheets::export_houses_xlsx;
use crate::templates::pages::{self, MapChoice, RenovationVm, SectorsVm};
use crate::templates::SidebarVm;
use astra::Request;
use std::collections::HashMap;

const MAIN_CSS: &str = include_str!("../static/main.css");

type Params = HashMap<String, String>;

pub fn handle(req: Request, ctx: &AppContext) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let params = parse_query(&req);

    tracing::debug!(method, path, "request");

    match (method, path) {
        ("GET", "/") | ("GET", "/map") => map(ctx, &params),
        ("GET", "/sectors") => sectors(ctx, &params),
        ("GET", "/features") => features(ctx, &params),
        ("GET", "/feature-engineering") => {
            let sidebar = sidebar(ctx, &params)?;
            html_response(pages::engineering_page(&sidebar))
        }
        ("GET", "/renovation") => renovation(ctx, &params),
        ("GET", "/renovation/estimate") => {
            let sidebar = sidebar(ctx, &params)?;
            let (house, renovation) = renovation_request(ctx, &sidebar, &params)?;
            let estimate = price_estimate(ctx, house, &renovation)?;
            html_response(pages::estimate_panel(&estimate, house.actual_price))
        }
        ("GET", "/collaborators") => {
            let sidebar = sidebar(ctx, &params)?;
            html_response(pages::collaborators_page(&sidebar))
        }
        ("GET", "/export") => {
            let sidebar = sidebar(ctx, &params)?;
            let houses: Vec<_> = ctx
                .houses_in(sidebar.sector, &sidebar.neighborhood)
                .collect();
            export_houses_xlsx(&houses, &sidebar.neighborhood)
        }
        ("GET", "/api/estimate") => {
            let sidebar = sidebar(ctx, &params)?;
            let (house, renovation) = renovation_request(ctx, &sidebar, &params)?;
            json_response(&price_estimate(ctx, house, &renovation)?)
        }
        ("GET", "/api/project") => {
            let lat = required_number(&params, "lat")?;
            let lon = required_number(&params, "lon")?;
            json_response(&project(lat, lon)?)
        }
        ("GET", "/static/main.css") => css_response(MAIN_CSS),
        _ => Err(ServerError::NotFound),
    }
}

fn map(ctx: &AppContext, params: &Params) -> ResultResp {
    let sidebar = sidebar(ctx, params)?;
    let choice = parse_choice(params, "choice", MapChoice::SalePrice, MapChoice::parse)?;
    let page = pages::map_page(&sidebar, choice, ctx.houses(), ctx.price_range())
        .map_err(|e| ServerError::DataError(format!("landmark projection failed: {e}")))?;
    html_response(page)
}

fn sectors(ctx: &AppContext, params: &Params) -> ResultResp {
    let sidebar = sidebar(ctx, params)?;
    let overlay = parse_choice(params, "overlay", OverlayChoice::SalePrice, OverlayChoice::parse)?;
    let composition = sector_composition(ctx.houses());
    let overlay_values = overlay_series(ctx.houses(), overlay);

    html_response(pages::sectors_page(
        &sidebar,
        &SectorsVm {
            overlay,
            composition: &composition,
            overlay_values: &overlay_values,
        },
    ))
}

fn features(ctx: &AppContext, params: &Params) -> ResultResp {
    let sidebar = sidebar(ctx, params)?;
    let pick = parse_choice(params, "pick", FeaturePick::KitchenQual, FeaturePick::parse)?;
    let facets = facets(ctx.plot_rows(), pick);
    html_response(pages::features_page(&sidebar, pick, &facets))
}

fn renovation(ctx: &AppContext, params: &Params) -> ResultResp {
    let sidebar = sidebar(ctx, params)?;
    let (model_house, renovation) = renovation_request(ctx, &sidebar, params)?;
    let selected = ctx.house(model_house.pid).ok_or(ServerError::NotFound)?;
    let estimate = price_estimate(ctx, model_house, &renovation)?;

    let vm = RenovationVm {
        houses: ctx
            .houses_in(sidebar.sector, &sidebar.neighborhood)
            .collect(),
        selected,
        model_house,
        renovation,
        estimate,
        price_range: ctx.price_range(),
    };
    html_response(pages::renovation_page(&sidebar, &vm))
}

/// Sector (by name or two-letter code) and neighborhood chosen in the sidebar.
/// An unknown sector is a bad request; a neighborhood outside the sector falls
/// back to the sector's first.
fn sidebar(ctx: &AppContext, params: &Params) -> Result<SidebarVm, ServerError> {
    let sector = match params.get("sector") {
        None => Sector::Downtown,
        Some(name) => Sector::from_name(name)
            .or_else(|| Sector::from_code(name))
            .ok_or_else(|| ServerError::BadRequest(format!("unknown sector '{name}'")))?,
    };

    let neighborhoods: Vec<String> = ctx
        .neighborhoods_in(sector)
        .into_iter()
        .map(String::from)
        .collect();
    let neighborhood = params
        .get("neighborhood")
        .filter(|n| neighborhoods.contains(*n))
        .or_else(|| neighborhoods.first())
        .cloned()
        .unwrap_or_default();

    Ok(SidebarVm {
        sector,
        neighborhoods,
        neighborhood,
    })
}

fn renovation_request<'a>(
    ctx: &'a AppContext,
    sidebar: &SidebarVm,
    params: &Params,
) -> Result<(&'a ModelHouse, Renovation), ServerError> {
    let pid: Pid = match params.get("pid") {
        Some(raw) => raw
            .parse()
            .map_err(|_| ServerError::BadRequest(format!("invalid pid '{raw}'")))?,
        None => ctx
            .baseline_pid(sidebar.sector, &sidebar.neighborhood)
            .ok_or(ServerError::NotFound)?,
    };
    let house = ctx.model_house(pid).ok_or(ServerError::NotFound)?;

    let baths = match params.get("baths") {
        Some(raw) => raw
            .parse::<f64>()
            .map_err(|_| ServerError::BadRequest(format!("invalid baths '{raw}'")))?,
        None => 0.0,
    };
    let renovation = Renovation::new(
        flag(params, "pool")?,
        flag(params, "central_air")?,
        flag(params, "paved_drive")?,
        baths,
    )?;
    renovation.check_supported(&house.features)?;

    Ok((house, renovation))
}

fn price_estimate(
    ctx: &AppContext,
    house: &ModelHouse,
    renovation: &Renovation,
) -> Result<PriceEstimate, ServerError> {
    let renovated = renovation.apply(&house.features);
    let result = estimate(&house.features, &renovated, ctx.model())?;

    tracing::debug!(
        pid = house.pid,
        base = result.base_price,
        reno = result.reno_price,
        "estimated renovation"
    );
    Ok(result)
}

/// Yes/No radio value; absent means "No".
fn flag(params: &Params, key: &str) -> Result<bool, ServerError> {
    match params.get(key).map(String::as_str) {
        None | Some("No") | Some("no") | Some("false") | Some("0") => Ok(false),
        Some("Yes") | Some("yes") | Some("true") | Some("1") => Ok(true),
        Some(other) => Err(ServerError::BadRequest(format!(
            "invalid value '{other}' for {key}"
        ))),
    }
}

fn parse_choice<T>(
    params: &Params,
    key: &str,
    default: T,
    parse: fn(&str) -> Option<T>,
) -> Result<T, ServerError> {
    match params.get(key) {
        None => Ok(default),
        Some(raw) => {
            parse(raw).ok_or_else(|| ServerError::BadRequest(format!("invalid {key} '{raw}'")))
        }
    }
}

fn required_number(params: &Params, key: &str) -> Result<f64, ServerError> {
    let raw = params
        .get(key)
        .ok_or_else(|| ServerError::BadRequest(format!("missing {key}")))?;
    raw.parse()
        .map_err(|_| ServerError::BadRequest(format!("invalid {key} '{raw}'")))
}

fn parse_query(req: &Request) -> Params {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
