//! GraphQL documents sent to the Storefront API.
//!
//! Fragments are spliced in with `concat!`, so they live in macros rather
//! than `const`s.

/// Maximum number of cart lines selected per cart fetch.
pub(crate) const CART_LINES_LIMIT: usize = 100;

macro_rules! cart_fragment {
    () => {
        r"
fragment CartFields on Cart {
  id
  checkoutUrl
  updatedAt
  cost {
    subtotalAmount { amount currencyCode }
    totalAmount { amount currencyCode }
    totalTaxAmount { amount currencyCode }
  }
  lines(first: 100) {
    nodes {
      id
      quantity
      cost { totalAmount { amount currencyCode } }
      merchandise {
        ... on ProductVariant {
          id
          title
          availableForSale
          price { amount currencyCode }
          selectedOptions { name value }
          product {
            title
            handle
            featuredImage { url altText }
          }
        }
      }
    }
  }
}
"
    };
}

macro_rules! product_fragment {
    () => {
        r"
fragment ProductFields on Product {
  id
  handle
  title
  description
  vendor
  productType
  tags
  availableForSale
  priceRange {
    minVariantPrice { amount currencyCode }
    maxVariantPrice { amount currencyCode }
  }
  featuredImage { url altText }
  images(first: 10) { nodes { url altText } }
  options { name values }
  variants(first: 100) {
    nodes {
      id
      title
      sku
      availableForSale
      price { amount currencyCode }
      compareAtPrice { amount currencyCode }
      selectedOptions { name value }
      image { url altText }
    }
  }
}
"
    };
}

macro_rules! user_errors {
    () => {
        "userErrors { field message code }"
    };
}

pub(crate) const CART_CREATE: &str = concat!(
    "mutation cartCreate($input: CartInput!) {\n",
    "  cartCreate(input: $input) { cart { ...CartFields } ",
    user_errors!(),
    " }\n}\n",
    cart_fragment!()
);

pub(crate) const CART_QUERY: &str = concat!(
    "query cart($cartId: ID!) {\n",
    "  cart(id: $cartId) { ...CartFields }\n}\n",
    cart_fragment!()
);

pub(crate) const CART_LINES_ADD: &str = concat!(
    "mutation cartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) {\n",
    "  cartLinesAdd(cartId: $cartId, lines: $lines) { cart { ...CartFields } ",
    user_errors!(),
    " }\n}\n",
    cart_fragment!()
);

pub(crate) const CART_LINES_UPDATE: &str = concat!(
    "mutation cartLinesUpdate($cartId: ID!, $lines: [CartLineUpdateInput!]!) {\n",
    "  cartLinesUpdate(cartId: $cartId, lines: $lines) { cart { ...CartFields } ",
    user_errors!(),
    " }\n}\n",
    cart_fragment!()
);

pub(crate) const CART_LINES_REMOVE: &str = concat!(
    "mutation cartLinesRemove($cartId: ID!, $lineIds: [ID!]!) {\n",
    "  cartLinesRemove(cartId: $cartId, lineIds: $lineIds) { cart { ...CartFields } ",
    user_errors!(),
    " }\n}\n",
    cart_fragment!()
);

pub(crate) const PRODUCTS_QUERY: &str = concat!(
    "query products($first: Int!, $after: String) {\n",
    "  products(first: $first, after: $after) {\n",
    "    pageInfo { hasNextPage endCursor }\n",
    "    nodes { ...ProductFields }\n",
    "  }\n}\n",
    product_fragment!()
);

pub(crate) const PRODUCT_BY_HANDLE: &str = concat!(
    "query productByHandle($handle: String!) {\n",
    "  product(handle: $handle) { ...ProductFields }\n}\n",
    product_fragment!()
);

pub(crate) const COLLECTIONS_QUERY: &str = r"
query collections($first: Int!, $after: String) {
  collections(first: $first, after: $after) {
    pageInfo { hasNextPage endCursor }
    nodes { id handle title description image { url altText } }
  }
}
";

pub(crate) const COLLECTION_BY_HANDLE: &str = concat!(
    "query collectionByHandle($handle: String!, $first: Int!) {\n",
    "  collection(handle: $handle) {\n",
    "    id handle title description image { url altText }\n",
    "    products(first: $first) {\n",
    "      pageInfo { hasNextPage endCursor }\n",
    "      nodes { ...ProductFields }\n",
    "    }\n",
    "  }\n}\n",
    product_fragment!()
);
